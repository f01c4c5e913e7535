//! Authorization interceptor wrapped around every guarded handler.
//!
//! Authentication has already happened by the time this runs; the
//! interceptor only compares the caller's token permissions with the
//! route's declared requirement.

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::warn;

use photoreport_auth::{AuthError, UserPermissionsFn, check_permissions, missing_permissions};

use crate::config::PermissionCheckOrder;
use crate::context::{RequestContext, RouteDescriptor};

#[derive(Clone, Copy)]
pub struct AuthorizationInterceptor {
    check: UserPermissionsFn,
    order: PermissionCheckOrder,
}

impl core::fmt::Debug for AuthorizationInterceptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthorizationInterceptor")
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

impl Default for AuthorizationInterceptor {
    fn default() -> Self {
        Self::new(check_permissions, PermissionCheckOrder::default())
    }
}

impl AuthorizationInterceptor {
    pub fn new(check: UserPermissionsFn, order: PermissionCheckOrder) -> Self {
        Self { check, order }
    }

    pub fn order(&self) -> PermissionCheckOrder {
        self.order
    }

    /// Permission decision for an already-authenticated request.
    pub fn decide(&self, route: &RouteDescriptor, ctx: &RequestContext) -> Result<(), AuthError> {
        let Some(required) = route.auth.required() else {
            return Ok(());
        };
        let Some(user) = ctx.current_user() else {
            return Err(AuthError::unauthorized("No authenticated user for this request.").into_access_token_error());
        };

        if (self.check)(&user.permissions, required) {
            return Ok(());
        }

        warn!(
            route = route.name,
            user_id = %user.id,
            missing = ?missing_permissions(&user.permissions, required),
            "permission denied"
        );
        Err(AuthError::Forbidden)
    }

    /// Run the handler and the permission decision in the configured order.
    ///
    /// With [`PermissionCheckOrder::AfterInvoke`] a denied caller's request
    /// still executes: writes are committed and only the response is replaced
    /// by the denial.
    pub async fn intercept(
        &self,
        route: &RouteDescriptor,
        ctx: &RequestContext,
        req: Request,
        next: Next,
    ) -> Result<Response, AuthError> {
        if route.auth.required().is_none() {
            return Ok(next.run(req).await);
        }

        match self.order {
            PermissionCheckOrder::BeforeInvoke => {
                self.decide(route, ctx)?;
                Ok(next.run(req).await)
            }
            PermissionCheckOrder::AfterInvoke => {
                let response = next.run(req).await;
                // A failing handler raises its own error before any decision.
                let status = response.status();
                if status.is_client_error() || status.is_server_error() {
                    return Ok(response);
                }
                self.decide(route, ctx)?;
                Ok(response)
            }
        }
    }
}
