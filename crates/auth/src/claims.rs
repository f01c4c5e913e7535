use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use photoreport_core::UserId;

use crate::PermissionKey;

/// Session identity reconstructed from a verified token.
///
/// This is a snapshot taken at login: permission checks use it as-is, even if
/// the stored user has been changed since the token was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Subject identifier.
    pub id: UserId,
    pub ci: String,
    pub name: String,
    /// Order and duplicates carry no meaning for authorization.
    pub permissions: Vec<PermissionKey>,
}

/// Signed token payload.
///
/// Only these fields are read back on verification; anything else a token
/// carries is dropped during decoding and never reaches an [`AuthUser`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: UserId,
    pub ci: String,
    pub name: String,
    pub permissions: Vec<PermissionKey>,

    /// Issued-at, seconds since epoch on the wire.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub iat: DateTime<Utc>,

    /// Expiration, seconds since epoch on the wire.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,
}

impl TokenClaims {
    pub fn new(user: &AuthUser, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: user.id,
            ci: user.ci.clone(),
            name: user.name.clone(),
            permissions: user.permissions.clone(),
            iat: issued_at,
            exp: expires_at,
        }
    }

    pub fn into_auth_user(self) -> AuthUser {
        AuthUser {
            id: self.id,
            ci: self.ci,
            name: self.name,
            permissions: self.permissions,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("jwt expired")]
    Expired,

    #[error("jwt not active")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate the token time window against `now`.
///
/// Signature verification happens in [`crate::TokenCodec`] before this runs.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn claims(iat: DateTime<Utc>, exp: DateTime<Utc>) -> TokenClaims {
        let user = AuthUser {
            id: UserId::new(),
            ci: "123".into(),
            name: "Perito".into(),
            permissions: vec![PermissionKey::ViewUser],
        };
        TokenClaims::new(&user, iat, exp)
    }

    #[test]
    fn window_is_half_open() {
        let iat = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let exp = iat + Duration::seconds(3600);
        let c = claims(iat, exp);

        assert_eq!(validate_claims(&c, iat), Ok(()));
        assert_eq!(validate_claims(&c, exp - Duration::seconds(1)), Ok(()));
        assert_eq!(validate_claims(&c, exp), Err(TokenValidationError::Expired));
        assert_eq!(
            validate_claims(&c, iat - Duration::seconds(1)),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        let iat = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let c = claims(iat, iat);
        assert_eq!(validate_claims(&c, iat), Err(TokenValidationError::InvalidTimeWindow));
    }

    #[test]
    fn timestamps_are_numeric_on_the_wire() {
        let iat = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let c = claims(iat, iat + Duration::seconds(3600));
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["iat"], iat.timestamp());
        assert_eq!(json["exp"], iat.timestamp() + 3600);
        assert_eq!(json["permissions"][0], "ViewUser");
    }

    #[test]
    fn extra_payload_fields_are_dropped() {
        let iat = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut json = serde_json::to_value(claims(iat, iat + Duration::seconds(60))).unwrap();
        json["password"] = "leaked".into();
        json["role"] = "root".into();

        let decoded: TokenClaims = serde_json::from_value(json).unwrap();
        let user = serde_json::to_value(decoded.into_auth_user()).unwrap();
        let keys: Vec<_> = user.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 4);
        assert!(user.get("password").is_none());
        assert!(user.get("role").is_none());
    }
}
