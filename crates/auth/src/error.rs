use thiserror::Error;

/// Transport-agnostic failure class; the API maps each to a status code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401-class.
    Unauthorized,
    /// 404-class.
    NotFound,
    /// 403-class.
    Forbidden,
    /// 500-class.
    Internal,
}

/// Failures raised anywhere in the authentication/authorization pipeline.
///
/// Display output is the message sent to the caller, so the extractor and
/// login messages are kept byte-for-byte stable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Missing/malformed credentials, bad signature, expiry, wrong password.
    #[error("{0}")]
    Unauthorized(String),

    /// Unknown `ci` at login.
    #[error("{0}")]
    NotFound(String),

    /// Any authentication failure once it crossed the strategy boundary.
    #[error("{0}")]
    InvalidAccessToken(String),

    /// A route named a strategy nobody registered.
    #[error("The strategy '{0}' is not available.")]
    StrategyNotFound(String),

    /// Authenticated, but the route's required permissions are not all granted.
    #[error("INVALID_ACCESS_PERMISSION")]
    Forbidden,

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("user store unavailable: {0}")]
    Store(String),
}

impl AuthError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Re-tag as `INVALID_ACCESS_TOKEN`, keeping the message.
    ///
    /// Every authentication failure surfaces identically on the wire, whatever
    /// the inner cause was.
    pub fn into_access_token_error(self) -> Self {
        match self {
            Self::InvalidAccessToken(_) => self,
            other => Self::InvalidAccessToken(other.to_string()),
        }
    }

    /// Machine-readable code rendered next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidAccessToken(_) => "INVALID_ACCESS_TOKEN",
            Self::StrategyNotFound(_) => "AUTHENTICATION_STRATEGY_NOT_FOUND",
            Self::Forbidden => "INVALID_ACCESS_PERMISSION",
            Self::Signing(_) | Self::Store(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) | Self::InvalidAccessToken(_) | Self::StrategyNotFound(_) => {
                ErrorKind::Unauthorized
            }
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Forbidden => ErrorKind::Forbidden,
            Self::Signing(_) | Self::Store(_) => ErrorKind::Internal,
        }
    }
}
