use axum::{Router, middleware::from_fn_with_state, routing::MethodRouter, routing::get};

use photoreport_auth::{AuthenticationMetadata, MetadataDeclaration, PermissionKey, RouteAuth};

use crate::context::RouteDescriptor;
use crate::middleware::{self, AuthState, RouteGuard};

pub mod reports;
pub mod system;
pub mod users;

/// Router for every endpoint. Each route carries its own guard, so public and
/// protected handlers can share a path.
pub fn router(auth: &AuthState) -> Router {
    Router::new()
        .route("/health", guarded(auth, "system.health", PUBLIC, get(system::health)))
        .nest("/users", users::router(auth))
        .nest("/informe-fotograficos", reports::router(auth))
}

/// No authentication metadata.
pub(crate) const PUBLIC: Option<MetadataDeclaration> = None;

pub(crate) fn jwt(required: impl IntoIterator<Item = PermissionKey>) -> Option<MetadataDeclaration> {
    Some(AuthenticationMetadata::jwt(required).into())
}

/// Any valid token, no specific permission.
pub(crate) fn authenticated() -> Option<MetadataDeclaration> {
    Some(AuthenticationMetadata::authenticated().into())
}

/// Resolve a route's declared metadata and attach the guard to its handler.
pub(crate) fn guarded(
    auth: &AuthState,
    name: &'static str,
    declaration: Option<MetadataDeclaration>,
    method_router: MethodRouter,
) -> MethodRouter {
    let route_auth = RouteAuth::resolve(declaration.as_ref());
    let guard = RouteGuard::new(auth.clone(), RouteDescriptor::new(name, route_auth));
    method_router.route_layer(from_fn_with_state(guard, middleware::route_guard))
}

#[cfg(test)]
mod tests {
    use photoreport_auth::RequiredPermissions;

    use super::*;

    #[test]
    fn declarations_resolve_to_distinct_route_auth() {
        assert_eq!(RouteAuth::resolve(PUBLIC.as_ref()), RouteAuth::Public);

        let any_user = RouteAuth::resolve(authenticated().as_ref());
        assert_eq!(any_user.required(), Some(&RequiredPermissions::none()));

        let viewer = RouteAuth::resolve(jwt([PermissionKey::ViewUser]).as_ref());
        assert_eq!(viewer, RouteAuth::jwt([PermissionKey::ViewUser]));
    }
}
