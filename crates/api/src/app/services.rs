use std::sync::Arc;

use photoreport_auth::{CredentialVerifier, JwtStrategy, StrategyRegistry, TokenCodec};
use photoreport_infra::{InMemoryReportStore, InMemoryUserStore};

use crate::authz::AuthorizationInterceptor;
use crate::config::ApiConfig;
use crate::middleware::AuthState;

/// Stores and auth collaborators shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub users: Arc<InMemoryUserStore>,
    pub reports: Arc<InMemoryReportStore>,
    pub verifier: CredentialVerifier,
}

/// Everything `build_app` needs: handler services plus the guard wiring.
#[derive(Debug, Clone)]
pub struct Wiring {
    pub services: Arc<AppServices>,
    pub auth: AuthState,
}

pub fn build_services(config: &ApiConfig) -> Wiring {
    let codec = Arc::new(TokenCodec::new(config.jwt_secret.as_bytes(), config.token_expires_in_secs));
    let users = Arc::new(InMemoryUserStore::new());
    let reports = Arc::new(InMemoryReportStore::new());

    let mut strategies = StrategyRegistry::new();
    strategies.register(Arc::new(JwtStrategy::new(codec.clone())));

    let verifier = CredentialVerifier::new(users.clone(), codec);

    Wiring {
        services: Arc::new(AppServices {
            users,
            reports,
            verifier,
        }),
        auth: AuthState {
            strategies: Arc::new(strategies),
            interceptor: AuthorizationInterceptor::new(
                photoreport_auth::check_permissions,
                config.permission_check,
            ),
        },
    }
}
