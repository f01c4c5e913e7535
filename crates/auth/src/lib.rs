//! `photoreport-auth`: authentication/authorization pipeline.
//!
//! Nothing here knows about HTTP or storage: the transport
//! hands in raw header values, persistence is reached through [`UserStore`].

pub mod authorize;
pub mod claims;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod metadata;
pub mod permissions;
pub mod strategy;
pub mod token;
pub mod user;

pub use authorize::{RequiredPermissions, UserPermissionsFn, check_permissions, missing_permissions};
pub use claims::{AuthUser, TokenClaims, TokenValidationError, validate_claims};
pub use credentials::{AuthCredential, CredentialVerifier, UserStore};
pub use error::{AuthError, ErrorKind};
pub use extract::{BEARER_SCHEME, extract_credentials};
pub use metadata::{AuthenticationMetadata, MetadataDeclaration, RouteAuth};
pub use permissions::PermissionKey;
pub use strategy::{AuthenticationStrategy, JwtStrategy, StrategyRegistry};
pub use token::{DEFAULT_EXPIRES_IN_SECS, MAX_EXPIRES_IN_SECS, TokenCodec};
pub use user::{NewUser, User, UserPatch};
