use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use photoreport_auth::{AuthError, RouteAuth, StrategyRegistry};

use crate::app::errors::auth_error_to_response;
use crate::authz::AuthorizationInterceptor;
use crate::context::{RequestContext, RouteDescriptor};

/// Shared, read-only authentication wiring.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub strategies: Arc<StrategyRegistry>,
    pub interceptor: AuthorizationInterceptor,
}

/// State of one route's guard: the shared wiring plus that route's metadata.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    state: AuthState,
    route: Arc<RouteDescriptor>,
}

impl RouteGuard {
    pub fn new(state: AuthState, route: RouteDescriptor) -> Self {
        Self {
            state,
            route: Arc::new(route),
        }
    }
}

/// Authenticate, then hand the request to the authorization interceptor.
pub async fn route_guard(State(guard): State<RouteGuard>, mut req: Request, next: Next) -> Response {
    let ctx = match authenticate(&guard.state.strategies, &guard.route, req.headers()) {
        Ok(ctx) => ctx,
        Err(err) => {
            debug!(route = guard.route.name, error = %err, "authentication failed");
            return auth_error_to_response(err);
        }
    };

    req.extensions_mut().insert(ctx.clone());

    match guard.state.interceptor.intercept(&guard.route, &ctx, req, next).await {
        Ok(response) => response,
        Err(err) => auth_error_to_response(err),
    }
}

/// Resolve the caller for a route. Public routes yield an anonymous context
/// without looking at the headers.
pub fn authenticate(
    strategies: &StrategyRegistry,
    route: &RouteDescriptor,
    headers: &HeaderMap,
) -> Result<RequestContext, AuthError> {
    let RouteAuth::Protected(metadata) = &route.auth else {
        return Ok(RequestContext::anonymous(route.name));
    };

    let authorization = headers
        .get(header::AUTHORIZATION)
        .map(|value| {
            value.to_str().map_err(|_| {
                AuthError::unauthorized("Authorization header is not of type 'Bearer'.").into_access_token_error()
            })
        })
        .transpose()?;

    let user = strategies.authenticate(&metadata.strategy, authorization)?;
    debug!(route = route.name, user_id = %user.id, "authenticated");
    Ok(RequestContext::authenticated(route.name, user))
}

/// Permissive CORS on every response; preflight requests are answered here.
pub async fn cors_middleware(req: Request, next: Next) -> Response {
    let mut response = if req.method() == Method::OPTIONS {
        (StatusCode::OK, "ok").into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,PUT,POST,DELETE,PATCH,OPTIONS"),
    );
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"));
    response
}
