//! Signed session tokens (HS256 JWT).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::{debug, warn};

use crate::{AuthError, AuthUser, TokenClaims, validate_claims};

/// Token lifetime used when configuration does not override it.
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// Longest accepted token lifetime (five years).
pub const MAX_EXPIRES_IN_SECS: i64 = 5 * 365 * 24 * 60 * 60;

/// Issues and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: Duration,
}

impl core::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("expires_in", &self.expires_in.num_seconds())
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl TokenCodec {
    /// Lifetimes beyond [`MAX_EXPIRES_IN_SECS`] in either direction are clamped.
    pub fn new(secret: &[u8], expires_in_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expires_in: Duration::seconds(expires_in_secs.clamp(-MAX_EXPIRES_IN_SECS, MAX_EXPIRES_IN_SECS)),
        }
    }

    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }

    /// Sign `user` into a token expiring `expires_in` from now.
    pub fn issue(&self, user: &AuthUser) -> Result<String, AuthError> {
        self.issue_at(user, Utc::now())
    }

    pub fn issue_at(&self, user: &AuthUser, now: DateTime<Utc>) -> Result<String, AuthError> {
        let expires = now
            .checked_add_signed(self.expires_in)
            .ok_or_else(|| AuthError::Signing("token expiry is out of range".to_string()))?;
        let claims = TokenClaims::new(user, now, expires);
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        debug!(subject = %user.id, "issued access token");
        Ok(token)
    }

    /// Verify signature and expiry, returning exactly `{id, ci, name, permissions}`.
    pub fn verify(&self, token: &str) -> Result<AuthUser, AuthError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<AuthUser, AuthError> {
        if token.is_empty() {
            return Err(AuthError::unauthorized(
                "Error verifying token : 'token' is null",
            ));
        }

        // Time-window checks are done by `validate_claims` against `now`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            let reason = match e.kind() {
                JwtErrorKind::InvalidSignature => "invalid signature".to_string(),
                JwtErrorKind::InvalidToken | JwtErrorKind::Base64(_) | JwtErrorKind::Utf8(_) => {
                    "jwt malformed".to_string()
                }
                _ => e.to_string(),
            };
            warn!(%reason, "token rejected");
            AuthError::unauthorized(format!("Error verifying token : {reason}"))
        })?;

        validate_claims(&data.claims, now).map_err(|e| {
            warn!(subject = %data.claims.id, reason = %e, "token rejected");
            AuthError::unauthorized(format!("Error verifying token : {e}"))
        })?;

        Ok(data.claims.into_auth_user())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use jsonwebtoken::EncodingKey;
    use photoreport_core::UserId;

    use super::*;
    use crate::PermissionKey;

    const SECRET: &[u8] = b"test-secret";

    fn user() -> AuthUser {
        AuthUser {
            id: UserId::new(),
            ci: "123".into(),
            name: "Fiscal Mamani".into(),
            permissions: vec![PermissionKey::ViewUser, PermissionKey::CreateUser],
        }
    }

    #[test]
    fn verify_returns_issued_identity() {
        let codec = TokenCodec::new(SECRET, DEFAULT_EXPIRES_IN_SECS);
        let u = user();

        let token = codec.issue(&u).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(codec.verify(&token).unwrap(), u);
    }

    #[test]
    fn empty_token_is_rejected() {
        let codec = TokenCodec::new(SECRET, DEFAULT_EXPIRES_IN_SECS);
        let err = codec.verify("").unwrap_err();
        assert_eq!(err, AuthError::unauthorized("Error verifying token : 'token' is null"));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let codec = TokenCodec::new(SECRET, DEFAULT_EXPIRES_IN_SECS);
        let err = codec.verify("not.a.jwt").unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized(_)));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let ours = TokenCodec::new(SECRET, DEFAULT_EXPIRES_IN_SECS);
        let theirs = TokenCodec::new(b"someone-else", DEFAULT_EXPIRES_IN_SECS);

        let token = theirs.issue(&user()).unwrap();
        let err = ours.verify(&token).unwrap_err();
        assert_eq!(err, AuthError::unauthorized("Error verifying token : invalid signature"));
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = TokenCodec::new(SECRET, 3600);
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let token = codec.issue_at(&user(), issued).unwrap();

        assert!(codec.verify_at(&token, issued + Duration::seconds(3599)).is_ok());
        let err = codec.verify_at(&token, issued + Duration::seconds(3600)).unwrap_err();
        assert_eq!(err, AuthError::unauthorized("Error verifying token : jwt expired"));
    }

    #[test]
    fn tampered_payload_fields_are_not_trusted() {
        // A correctly signed payload carrying extra fields still yields only the four identity fields.
        let u = user();
        let now = Utc::now();
        let payload = serde_json::json!({
            "id": u.id,
            "ci": u.ci,
            "name": u.name,
            "permissions": u.permissions,
            "iat": now.timestamp(),
            "exp": now.timestamp() + 60,
            "admin": true,
            "password": "hunter22",
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let codec = TokenCodec::new(SECRET, 60);
        assert_eq!(codec.verify(&token).unwrap(), u);
    }

    #[test]
    fn unknown_permission_in_payload_is_rejected() {
        let now = Utc::now();
        let payload = serde_json::json!({
            "id": UserId::new(),
            "ci": "1",
            "name": "x",
            "permissions": ["Superuser"],
            "iat": now.timestamp(),
            "exp": now.timestamp() + 60,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let codec = TokenCodec::new(SECRET, 60);
        assert!(matches!(codec.verify(&token), Err(AuthError::Unauthorized(_))));
    }

    #[test]
    fn oversized_lifetime_is_clamped() {
        let codec = TokenCodec::new(SECRET, 100_000_000_000_000);
        assert_eq!(codec.expires_in(), Duration::seconds(MAX_EXPIRES_IN_SECS));
        assert!(codec.verify(&codec.issue(&user()).unwrap()).is_ok());

        let codec = TokenCodec::new(SECRET, i64::MAX);
        assert_eq!(codec.expires_in(), Duration::seconds(MAX_EXPIRES_IN_SECS));
    }

    #[test]
    fn expiry_past_the_calendar_is_a_signing_error() {
        let codec = TokenCodec::new(SECRET, MAX_EXPIRES_IN_SECS);
        let err = codec.issue_at(&user(), DateTime::<Utc>::MAX_UTC).unwrap_err();
        assert!(matches!(err, AuthError::Signing(_)));
    }

    #[test]
    fn debug_redacts_keys() {
        let codec = TokenCodec::new(SECRET, 60);
        let dbg = format!("{codec:?}");
        assert!(dbg.contains("[REDACTED]"));
        assert!(!dbg.contains("test-secret"));
    }
}
