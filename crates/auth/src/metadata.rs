//! Per-route authentication metadata.

use serde::{Deserialize, Serialize};

use crate::{PermissionKey, RequiredPermissions};

/// What an endpoint declares: which strategy authenticates it and which
/// permissions the caller must hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationMetadata {
    pub strategy: String,
    #[serde(default)]
    pub options: RequiredPermissions,
}

impl AuthenticationMetadata {
    pub fn new(strategy: impl Into<String>, options: RequiredPermissions) -> Self {
        Self {
            strategy: strategy.into(),
            options,
        }
    }

    /// `jwt` strategy with the given requirement.
    pub fn jwt(required: impl IntoIterator<Item = PermissionKey>) -> Self {
        Self::new(crate::strategy::JWT_STRATEGY, RequiredPermissions::new(required))
    }

    /// `jwt` strategy, any authenticated caller.
    pub fn authenticated() -> Self {
        Self::new(crate::strategy::JWT_STRATEGY, RequiredPermissions::none())
    }
}

impl From<AuthenticationMetadata> for MetadataDeclaration {
    fn from(metadata: AuthenticationMetadata) -> Self {
        MetadataDeclaration::One(metadata)
    }
}

/// Metadata as it may be attached to a route: a single descriptor or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataDeclaration {
    One(AuthenticationMetadata),
    Many(Vec<AuthenticationMetadata>),
}

impl MetadataDeclaration {
    /// Both shapes collapse to one descriptor: a list contributes its first
    /// element, an empty list contributes nothing.
    pub fn normalize(&self) -> Option<&AuthenticationMetadata> {
        match self {
            MetadataDeclaration::One(m) => Some(m),
            MetadataDeclaration::Many(list) => list.first(),
        }
    }
}

/// Resolved authentication requirement for one route.
///
/// `Public` and `Protected` with an empty `required` list are different
/// states: the former skips authentication entirely, the latter demands a
/// valid token but no specific permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAuth {
    Public,
    Protected(AuthenticationMetadata),
}

impl RouteAuth {
    pub fn resolve(declaration: Option<&MetadataDeclaration>) -> Self {
        match declaration.and_then(MetadataDeclaration::normalize) {
            Some(m) => RouteAuth::Protected(m.clone()),
            None => RouteAuth::Public,
        }
    }

    pub fn jwt(required: impl IntoIterator<Item = PermissionKey>) -> Self {
        RouteAuth::Protected(AuthenticationMetadata::jwt(required))
    }

    pub fn authenticated() -> Self {
        RouteAuth::Protected(AuthenticationMetadata::authenticated())
    }

    pub fn required(&self) -> Option<&RequiredPermissions> {
        match self {
            RouteAuth::Public => None,
            RouteAuth::Protected(m) => Some(&m.options),
        }
    }
}
