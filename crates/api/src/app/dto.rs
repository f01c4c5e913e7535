use chrono::Utc;
use serde::{Deserialize, Serialize};

use photoreport_core::{PhotoReport, ReportId, UserId};

use crate::app::errors::ApiError;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /informe-fotograficos`.
#[derive(Debug, Deserialize)]
pub struct NewReportRequest {
    pub encabezado: String,
    pub pie_de_pagina: String,
    pub url_fotos_ftp: String,
    #[serde(default)]
    pub terminado: bool,
    #[serde(default)]
    pub orden_grupos: Vec<String>,
    pub foto_width: Option<String>,
    pub foto_height: Option<String>,
    /// Defaults to the caller.
    pub user_id: Option<UserId>,
}

impl NewReportRequest {
    pub fn into_report(self, caller: UserId) -> PhotoReport {
        let mut report = PhotoReport::new(
            self.user_id.unwrap_or(caller),
            self.encabezado,
            self.pie_de_pagina,
            self.url_fotos_ftp,
            Utc::now(),
        );
        report.terminado = self.terminado;
        report.orden_grupos = self.orden_grupos;
        if let Some(w) = self.foto_width {
            report.foto_width = w;
        }
        if let Some(h) = self.foto_height {
            report.foto_height = h;
        }
        report
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

// -------------------------
// Path parsing
// -------------------------

pub fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    Ok(raw.parse::<UserId>()?)
}

pub fn parse_report_id(raw: &str) -> Result<ReportId, ApiError> {
    Ok(raw.parse::<ReportId>()?)
}
