use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Capability tag from the closed permission vocabulary.
///
/// Serialized as the exact variant name (e.g. `"ViewUser"`); tokens and stored
/// users carry these names, so renaming a variant is a wire-breaking change.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PermissionKey {
    /// Create user accounts.
    CreateUser,
    /// Read other users' records.
    ViewUser,
    /// Update other users' records.
    UpdateUser,
    /// Delete other users.
    DeleteUser,
    /// Create photographic reports.
    CreateInFoto,
    /// Read photographic reports.
    ViewInFoto,
    /// Update photographic reports.
    UpdateInFoto,
    /// Delete photographic reports.
    DeleteInFoto,
}

impl PermissionKey {
    /// The whole vocabulary. Also the default grant for users created
    /// without an explicit permission list.
    pub const ALL: [PermissionKey; 8] = [
        PermissionKey::CreateUser,
        PermissionKey::ViewUser,
        PermissionKey::UpdateUser,
        PermissionKey::DeleteUser,
        PermissionKey::CreateInFoto,
        PermissionKey::ViewInFoto,
        PermissionKey::UpdateInFoto,
        PermissionKey::DeleteInFoto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionKey::CreateUser => "CreateUser",
            PermissionKey::ViewUser => "ViewUser",
            PermissionKey::UpdateUser => "UpdateUser",
            PermissionKey::DeleteUser => "DeleteUser",
            PermissionKey::CreateInFoto => "CreateInFoto",
            PermissionKey::ViewInFoto => "ViewInFoto",
            PermissionKey::UpdateInFoto => "UpdateInFoto",
            PermissionKey::DeleteInFoto => "DeleteInFoto",
        }
    }
}

impl core::fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission '{0}'")]
pub struct UnknownPermission(pub String);

impl FromStr for PermissionKey {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PermissionKey::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_serde_representation() {
        for p in PermissionKey::ALL {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{}\"", p.as_str()));
            assert_eq!(p.as_str().parse::<PermissionKey>().unwrap(), p);
        }
    }

    #[test]
    fn matching_is_exact() {
        assert!("viewuser".parse::<PermissionKey>().is_err());
        assert!("ViewUser ".parse::<PermissionKey>().is_err());
        assert!(serde_json::from_str::<PermissionKey>("\"Admin\"").is_err());
    }
}
