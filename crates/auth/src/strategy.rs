//! Named authentication strategies.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::{AuthError, AuthUser, TokenCodec, extract_credentials};

pub const JWT_STRATEGY: &str = "jwt";

/// Turns a request's raw `Authorization` header into an identity.
pub trait AuthenticationStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn authenticate(&self, authorization: Option<&str>) -> Result<AuthUser, AuthError>;
}

/// Bearer-token strategy: extract, verify, and re-tag any failure as
/// `INVALID_ACCESS_TOKEN` so callers never learn why authentication failed.
#[derive(Debug, Clone)]
pub struct JwtStrategy {
    codec: Arc<TokenCodec>,
}

impl JwtStrategy {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }
}

impl AuthenticationStrategy for JwtStrategy {
    fn name(&self) -> &str {
        JWT_STRATEGY
    }

    fn authenticate(&self, authorization: Option<&str>) -> Result<AuthUser, AuthError> {
        extract_credentials(authorization)
            .and_then(|token| self.codec.verify(token))
            .map_err(AuthError::into_access_token_error)
    }
}

/// Strategy lookup by name, populated once at startup.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: HashMap<String, Arc<dyn AuthenticationStrategy>>,
}

impl core::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut names: Vec<_> = self.strategies.keys().collect();
        names.sort();
        f.debug_struct("StrategyRegistry").field("strategies", &names).finish()
    }
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register under the strategy's own name, replacing any previous one.
    pub fn register(&mut self, strategy: Arc<dyn AuthenticationStrategy>) -> &mut Self {
        debug!(strategy = strategy.name(), "registered authentication strategy");
        self.strategies.insert(strategy.name().to_string(), strategy);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn AuthenticationStrategy>> {
        self.strategies.get(name).cloned()
    }

    pub fn authenticate(&self, name: &str, authorization: Option<&str>) -> Result<AuthUser, AuthError> {
        let strategy = self
            .strategies
            .get(name)
            .ok_or_else(|| AuthError::StrategyNotFound(name.to_string()))?;
        strategy.authenticate(authorization)
    }
}

#[cfg(test)]
mod tests {
    use photoreport_core::UserId;

    use super::*;
    use crate::{PermissionKey, token::DEFAULT_EXPIRES_IN_SECS};

    fn codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(b"strategy-secret", DEFAULT_EXPIRES_IN_SECS))
    }

    fn user() -> AuthUser {
        AuthUser {
            id: UserId::new(),
            ci: "987".into(),
            name: "Perito".into(),
            permissions: vec![PermissionKey::ViewInFoto],
        }
    }

    #[test]
    fn authenticates_valid_bearer_token() {
        let codec = codec();
        let u = user();
        let header = format!("Bearer {}", codec.issue(&u).unwrap());

        let strategy = JwtStrategy::new(codec);
        assert_eq!(strategy.authenticate(Some(header.as_str())).unwrap(), u);
    }

    #[test]
    fn every_failure_is_retagged() {
        let strategy = JwtStrategy::new(codec());
        let foreign = TokenCodec::new(b"other", 60).issue(&user()).unwrap();
        let foreign = format!("Bearer {foreign}");

        for header in [None, Some("Basic abc"), Some("Bearer a b"), Some("Bearer "), Some(foreign.as_str())] {
            let err = strategy.authenticate(header).unwrap_err();
            assert_eq!(err.code(), "INVALID_ACCESS_TOKEN", "header {header:?}");
            assert_eq!(err.kind(), crate::ErrorKind::Unauthorized);
        }
    }

    #[test]
    fn retag_preserves_inner_message() {
        let strategy = JwtStrategy::new(codec());
        let err = strategy.authenticate(None).unwrap_err();
        assert_eq!(err, AuthError::InvalidAccessToken("Authorization header not found.".into()));
    }

    #[test]
    fn registry_dispatches_by_name() {
        let codec = codec();
        let u = user();
        let header = format!("Bearer {}", codec.issue(&u).unwrap());

        let mut registry = StrategyRegistry::new();
        registry.register(Arc::new(JwtStrategy::new(codec)));

        assert!(registry.get(JWT_STRATEGY).is_some());
        assert_eq!(registry.authenticate("jwt", Some(header.as_str())).unwrap(), u);
        assert_eq!(
            registry.authenticate("basic", Some(header.as_str())).unwrap_err(),
            AuthError::StrategyNotFound("basic".into())
        );
    }
}
