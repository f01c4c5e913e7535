use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use photoreport_auth::{AuthError, AuthUser, RouteAuth};

use crate::app::errors::ApiError;

/// Static description of a guarded route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Stable name used in logs (e.g. `users.delete`).
    pub name: &'static str,
    pub auth: RouteAuth,
}

impl RouteDescriptor {
    pub fn new(name: &'static str, auth: RouteAuth) -> Self {
        Self { name, auth }
    }
}

/// Per-request authentication state.
///
/// Created by the route guard and carried in request extensions so handlers
/// and the authorization interceptor read the same identity.
#[derive(Debug, Clone)]
pub struct RequestContext {
    route: &'static str,
    user: Option<AuthUser>,
}

impl RequestContext {
    pub fn anonymous(route: &'static str) -> Self {
        Self { route, user: None }
    }

    pub fn authenticated(route: &'static str, user: AuthUser) -> Self {
        Self { route, user: Some(user) }
    }

    pub fn route(&self) -> &'static str {
        self.route
    }

    /// Identity established by authentication; `None` on public routes.
    pub fn current_user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }
}

/// Extractor for the authenticated caller.
///
/// Rejects with 401 when the route was not authenticated.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .and_then(RequestContext::current_user)
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AuthError::unauthorized("No authenticated user for this request.").into())
    }
}
