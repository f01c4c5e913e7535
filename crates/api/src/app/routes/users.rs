use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    routing::{delete, get, patch, post, put},
};
use tracing::info;

use photoreport_auth::{
    AuthCredential, NewUser,
    PermissionKey::{DeleteUser, UpdateUser, ViewInFoto, ViewUser},
    PermissionKey, User, UserPatch,
};
use photoreport_core::{DomainError, PhotoReport};

use crate::app::dto::{self, CountResponse, TokenResponse};
use crate::app::errors::ApiError;
use crate::app::routes::{PUBLIC, authenticated, guarded, jwt};
use crate::app::services::AppServices;
use crate::context::CurrentUser;
use crate::middleware::AuthState;

pub fn router(auth: &AuthState) -> Router {
    Router::new()
        .route("/", guarded(auth, "users.create", PUBLIC, post(create_user)))
        .route("/", guarded(auth, "users.find", jwt([ViewUser]), get(find)))
        .route("/login", guarded(auth, "users.login", PUBLIC, post(login)))
        .route("/auth", guarded(auth, "users.find_by_token", jwt([ViewUser]), get(find_user_by_token)))
        .route("/permissions", guarded(auth, "users.permissions", jwt([ViewUser]), get(permissions)))
        .route("/count", guarded(auth, "users.count", jwt([ViewUser]), get(count)))
        .route("/my-account", guarded(auth, "users.update_my_account", authenticated(), patch(update_my_account)))
        .route("/:id", guarded(auth, "users.find_by_id", jwt([ViewUser]), get(find_by_id)))
        .route("/:id", guarded(auth, "users.update_by_id", jwt([UpdateUser]), patch(update_by_id)))
        .route("/:id", guarded(auth, "users.replace_by_id", jwt([UpdateUser]), put(replace_by_id)))
        .route("/:id", guarded(auth, "users.delete_by_id", jwt([DeleteUser]), delete(delete_by_id)))
        .route("/:id/informe-fotograficos", guarded(auth, "users.reports", jwt([ViewInFoto]), get(reports)))
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(input): Json<NewUser>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(services.users.create(input)?))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(credential): Json<AuthCredential>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = services.verifier.get_token(&credential).await?;
    info!(ci = %credential.ci, "token issued");
    Ok(Json(TokenResponse { token }))
}

/// Stored record of the token's subject.
pub async fn find_user_by_token(
    CurrentUser(user): CurrentUser,
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(services.users.get(&user.id)?))
}

pub async fn permissions() -> Json<[PermissionKey; 8]> {
    Json(PermissionKey::ALL)
}

pub async fn count(Extension(services): Extension<Arc<AppServices>>) -> Result<Json<CountResponse>, ApiError> {
    Ok(Json(CountResponse {
        count: services.users.count()?,
    }))
}

pub async fn find(Extension(services): Extension<Arc<AppServices>>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(services.users.list()?))
}

pub async fn find_by_id(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = dto::parse_user_id(&id)?;
    Ok(Json(services.users.get(&id)?))
}

pub async fn update_my_account(
    CurrentUser(user): CurrentUser,
    Extension(services): Extension<Arc<AppServices>>,
    Json(patch): Json<UserPatch>,
) -> Result<StatusCode, ApiError> {
    services.users.update(&user.id, patch)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_by_id(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<StatusCode, ApiError> {
    let id = dto::parse_user_id(&id)?;
    services.users.update(&id, patch)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn replace_by_id(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(input): Json<NewUser>,
) -> Result<StatusCode, ApiError> {
    let id = dto::parse_user_id(&id)?;
    services.users.replace(&id, input)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Users cannot delete their own account.
pub async fn delete_by_id(
    CurrentUser(user): CurrentUser,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = dto::parse_user_id(&id)?;
    if id == user.id {
        return Err(DomainError::Unauthorized.into());
    }
    services.users.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reports authored by a user, oldest first.
pub async fn reports(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PhotoReport>>, ApiError> {
    let id = dto::parse_user_id(&id)?;
    Ok(Json(services.reports.list_by_user(&id)?))
}
