//! Login: credential check against the user store, then token issuance.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use photoreport_core::DomainResult;

use crate::{AuthError, TokenCodec, User};

/// Login input. Transient; never stored or logged.
#[derive(Clone, Deserialize)]
pub struct AuthCredential {
    pub ci: String,
    pub password: String,
}

impl core::fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthCredential")
            .field("ci", &self.ci)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Lookup the verifier needs from persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// At most one user per `ci`.
    async fn find_by_ci(&self, ci: &str) -> DomainResult<Option<User>>;
}

#[async_trait]
impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    async fn find_by_ci(&self, ci: &str) -> DomainResult<Option<User>> {
        (**self).find_by_ci(ci).await
    }
}

/// Validates a credential and issues a token for the matching user.
#[derive(Clone)]
pub struct CredentialVerifier {
    users: Arc<dyn UserStore>,
    codec: Arc<TokenCodec>,
}

impl core::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CredentialVerifier")
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

impl CredentialVerifier {
    pub fn new(users: Arc<dyn UserStore>, codec: Arc<TokenCodec>) -> Self {
        Self { users, codec }
    }

    /// `NotFound` for an unknown `ci`, `Unauthorized` for a wrong password.
    pub async fn get_token(&self, credential: &AuthCredential) -> Result<String, AuthError> {
        info!(ci = %credential.ci, "login attempt");

        let found = self
            .users
            .find_by_ci(&credential.ci)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?
            .ok_or_else(|| {
                warn!(ci = %credential.ci, "login failed: unknown ci");
                AuthError::not_found(format!("User with ci {} not found.", credential.ci))
            })?;

        // Passwords are stored as submitted; only the comparison is hardened.
        if !bool::from(credential.password.as_bytes().ct_eq(found.password.as_bytes())) {
            warn!(ci = %credential.ci, "login failed: bad credentials");
            return Err(AuthError::unauthorized("The credentials are not correct."));
        }

        self.codec.issue(&found.to_auth_user())
    }
}
