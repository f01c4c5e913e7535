//! Photographic report record ("informe fotográfico").
//!
//! Photos themselves are stored elsewhere; a report only carries the opaque
//! reference (`url_fotos_ftp`) under which its photo batch was uploaded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Entity, ReportId, UserId};

pub const DEFAULT_FOTO_WIDTH: &str = "30%";
pub const DEFAULT_FOTO_HEIGHT: &str = "300px";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoReport {
    pub id: ReportId,
    pub encabezado: String,
    pub pie_de_pagina: String,
    pub url_fotos_ftp: String,
    pub terminado: bool,
    /// Display order of the report's photo groups (group ids).
    pub orden_grupos: Vec<String>,
    pub foto_width: String,
    pub foto_height: String,
    pub created: DateTime<Utc>,
    /// Author of the report.
    pub user_id: UserId,
}

impl PhotoReport {
    /// New unfinished report with default layout.
    pub fn new(
        user_id: UserId,
        encabezado: impl Into<String>,
        pie_de_pagina: impl Into<String>,
        url_fotos_ftp: impl Into<String>,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReportId::new(),
            encabezado: encabezado.into(),
            pie_de_pagina: pie_de_pagina.into(),
            url_fotos_ftp: url_fotos_ftp.into(),
            terminado: false,
            orden_grupos: Vec::new(),
            foto_width: DEFAULT_FOTO_WIDTH.to_string(),
            foto_height: DEFAULT_FOTO_HEIGHT.to_string(),
            created,
            user_id,
        }
    }

    pub fn apply(&mut self, patch: ReportPatch) {
        if let Some(v) = patch.encabezado {
            self.encabezado = v;
        }
        if let Some(v) = patch.pie_de_pagina {
            self.pie_de_pagina = v;
        }
        if let Some(v) = patch.url_fotos_ftp {
            self.url_fotos_ftp = v;
        }
        if let Some(v) = patch.terminado {
            self.terminado = v;
        }
        if let Some(v) = patch.orden_grupos {
            self.orden_grupos = v;
        }
        if let Some(v) = patch.foto_width {
            self.foto_width = v;
        }
        if let Some(v) = patch.foto_height {
            self.foto_height = v;
        }
    }
}

impl Entity for PhotoReport {
    const NAME: &'static str = "InformeFotografico";
    type Id = ReportId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPatch {
    pub encabezado: Option<String>,
    pub pie_de_pagina: Option<String>,
    pub url_fotos_ftp: Option<String>,
    pub terminado: Option<bool>,
    pub orden_grupos: Option<Vec<String>>,
    pub foto_width: Option<String>,
    pub foto_height: Option<String>,
}
