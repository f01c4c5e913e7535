//! Process configuration read from environment variables.

use std::net::SocketAddr;
use std::str::FromStr;

use photoreport_auth::{DEFAULT_EXPIRES_IN_SECS, MAX_EXPIRES_IN_SECS};
use photoreport_observability::LogFormat;
use thiserror::Error;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEV_JWT_SECRET: &str = "photoreport-dev-secret";

/// When the authorization interceptor evaluates permissions relative to the
/// handler call.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PermissionCheckOrder {
    /// Run the handler, then decide. A denied caller still triggers the
    /// handler's side effects; only the response is withheld.
    #[default]
    AfterInvoke,
    /// Decide first; denied requests never reach the handler.
    BeforeInvoke,
}

impl FromStr for PermissionCheckOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "after" => Ok(Self::AfterInvoke),
            "before" => Ok(Self::BeforeInvoke),
            _ => Err(ConfigError::invalid("PERMISSION_CHECK", s, "expected 'after' or 'before'")),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    pub jwt_secret: String,
    /// Set when `JWT_SECRET` was absent and the development secret is in use.
    pub insecure_secret: bool,
    pub token_expires_in_secs: i64,
    pub permission_check: PermissionCheckOrder,
    pub log_format: LogFormat,
}

impl core::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind", &self.bind)
            .field("jwt_secret", &"<redacted>")
            .field("insecure_secret", &self.insecure_secret)
            .field("token_expires_in_secs", &self.token_expires_in_secs)
            .field("permission_check", &self.permission_check)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            insecure_secret: true,
            token_expires_in_secs: DEFAULT_EXPIRES_IN_SECS,
            permission_check: PermissionCheckOrder::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let bind = lookup("PHOTOREPORT_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        config.bind = bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::invalid("PHOTOREPORT_BIND", &bind, e.to_string()))?;

        if let Some(secret) = lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            config.jwt_secret = secret;
            config.insecure_secret = false;
        }

        if let Some(raw) = lookup("TOKEN_EXPIRES_IN") {
            config.token_expires_in_secs = match raw.trim().parse::<i64>() {
                Ok(secs) if secs > 0 && secs <= MAX_EXPIRES_IN_SECS => secs,
                _ => {
                    return Err(ConfigError::invalid(
                        "TOKEN_EXPIRES_IN",
                        &raw,
                        format!("expected between 1 and {MAX_EXPIRES_IN_SECS} seconds"),
                    ));
                }
            };
        }

        if let Some(raw) = lookup("PERMISSION_CHECK") {
            config.permission_check = raw.parse()?;
        }

        if let Some(raw) = lookup("LOG_FORMAT") {
            config.log_format = raw
                .parse()
                .map_err(|e: photoreport_observability::UnknownLogFormat| {
                    ConfigError::invalid("LOG_FORMAT", &raw, e.to_string())
                })?;
        }

        Ok(config)
    }
}
