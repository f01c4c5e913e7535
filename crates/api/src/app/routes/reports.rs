use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    routing::{delete, get, patch, post},
};

use photoreport_auth::{
    PermissionKey::{CreateInFoto, DeleteInFoto, UpdateInFoto, ViewInFoto},
    User,
};
use photoreport_core::{PhotoReport, ReportPatch};

use crate::app::dto::{self, CountResponse, NewReportRequest};
use crate::app::errors::ApiError;
use crate::app::routes::{guarded, jwt};
use crate::app::services::AppServices;
use crate::context::CurrentUser;
use crate::middleware::AuthState;

pub fn router(auth: &AuthState) -> Router {
    Router::new()
        .route("/", guarded(auth, "reports.create", jwt([CreateInFoto]), post(create)))
        .route("/", guarded(auth, "reports.find", jwt([ViewInFoto]), get(find)))
        .route("/count", guarded(auth, "reports.count", jwt([ViewInFoto]), get(count)))
        .route("/:id", guarded(auth, "reports.find_by_id", jwt([ViewInFoto]), get(find_by_id)))
        .route("/:id", guarded(auth, "reports.update_by_id", jwt([UpdateInFoto]), patch(update_by_id)))
        .route("/:id", guarded(auth, "reports.delete_by_id", jwt([DeleteInFoto]), delete(delete_by_id)))
        .route("/:id/user", guarded(auth, "reports.author", jwt([ViewInFoto]), get(author)))
}

pub async fn create(
    CurrentUser(user): CurrentUser,
    Extension(services): Extension<Arc<AppServices>>,
    Json(req): Json<NewReportRequest>,
) -> Result<Json<PhotoReport>, ApiError> {
    Ok(Json(services.reports.create(req.into_report(user.id))?))
}

pub async fn find(Extension(services): Extension<Arc<AppServices>>) -> Result<Json<Vec<PhotoReport>>, ApiError> {
    Ok(Json(services.reports.list()?))
}

pub async fn count(Extension(services): Extension<Arc<AppServices>>) -> Result<Json<CountResponse>, ApiError> {
    Ok(Json(CountResponse {
        count: services.reports.count()?,
    }))
}

pub async fn find_by_id(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<PhotoReport>, ApiError> {
    let id = dto::parse_report_id(&id)?;
    Ok(Json(services.reports.get(&id)?))
}

pub async fn update_by_id(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(patch): Json<ReportPatch>,
) -> Result<StatusCode, ApiError> {
    let id = dto::parse_report_id(&id)?;
    services.reports.update(&id, patch)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_by_id(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = dto::parse_report_id(&id)?;
    services.reports.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Author of a report.
pub async fn author(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = dto::parse_report_id(&id)?;
    let report = services.reports.get(&id)?;
    Ok(Json(services.users.get(&report.user_id)?))
}
