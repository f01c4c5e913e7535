//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: stores, token codec, strategy registry, interceptor
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs and path parsing
//! - `errors.rs`: consistent error responses

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(config: &ApiConfig) -> Router {
    let wiring = services::build_services(config);

    routes::router(&wiring.auth).layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::cors_middleware))
            .layer(Extension(wiring.services)),
    )
}
