use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::PermissionKey;

/// Permissions a route declares. Empty means "any authenticated caller".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredPermissions {
    pub required: Vec<PermissionKey>,
}

impl RequiredPermissions {
    pub fn new(required: impl IntoIterator<Item = PermissionKey>) -> Self {
        Self {
            required: required.into_iter().collect(),
        }
    }

    /// Authenticated-only gate.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Signature of the permission predicate the interceptor is configured with.
pub type UserPermissionsFn = fn(&[PermissionKey], &RequiredPermissions) -> bool;

/// True iff every required permission is granted.
///
/// - No IO
/// - No panics
/// - Order and duplicates on either side are irrelevant
pub fn check_permissions(granted: &[PermissionKey], required: &RequiredPermissions) -> bool {
    let granted: HashSet<PermissionKey> = granted.iter().copied().collect();
    required.required.iter().all(|p| granted.contains(p))
}

/// Required permissions the caller lacks, deduplicated, in declaration order.
///
/// Used for denial logs; never rendered to the client.
pub fn missing_permissions(granted: &[PermissionKey], required: &RequiredPermissions) -> Vec<PermissionKey> {
    let granted: HashSet<PermissionKey> = granted.iter().copied().collect();
    let mut seen = HashSet::new();
    required
        .required
        .iter()
        .copied()
        .filter(|p| !granted.contains(p) && seen.insert(*p))
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::PermissionKey::*;

    #[test]
    fn empty_requirement_admits_everyone() {
        assert!(check_permissions(&[], &RequiredPermissions::none()));
        assert!(check_permissions(&[ViewUser], &RequiredPermissions::none()));
    }

    #[test]
    fn nothing_granted_fails_any_requirement() {
        assert!(!check_permissions(&[], &RequiredPermissions::new([ViewUser])));
    }

    #[test]
    fn superset_passes() {
        assert!(check_permissions(
            &[ViewUser, CreateUser],
            &RequiredPermissions::new([ViewUser])
        ));
    }

    #[test]
    fn all_required_must_be_present() {
        let required = RequiredPermissions::new([ViewInFoto, UpdateInFoto]);
        assert!(!check_permissions(&[ViewInFoto], &required));
        assert!(check_permissions(&[UpdateInFoto, ViewInFoto], &required));
    }

    #[test]
    fn missing_lists_each_absent_permission_once() {
        let required = RequiredPermissions::new([DeleteUser, ViewUser, DeleteUser]);
        assert_eq!(missing_permissions(&[ViewUser], &required), vec![DeleteUser]);
        assert!(missing_permissions(&[DeleteUser, ViewUser], &required).is_empty());
    }

    fn permission() -> impl Strategy<Value = PermissionKey> {
        proptest::sample::select(PermissionKey::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: the check is exactly set containment.
        #[test]
        fn check_is_subset_test(
            granted in prop::collection::vec(permission(), 0..12),
            required in prop::collection::vec(permission(), 0..6),
        ) {
            let expected = required.iter().all(|r| granted.contains(r));
            prop_assert_eq!(check_permissions(&granted, &RequiredPermissions::new(required)), expected);
        }

        /// Property: order and duplicates of the grant do not change the decision.
        #[test]
        fn grant_order_and_duplicates_are_irrelevant(
            granted in prop::collection::vec(permission(), 0..12),
            required in prop::collection::vec(permission(), 0..6),
        ) {
            let required = RequiredPermissions::new(required);
            let mut shuffled = granted.clone();
            shuffled.reverse();
            shuffled.extend(granted.iter().copied());
            prop_assert_eq!(
                check_permissions(&granted, &required),
                check_permissions(&shuffled, &required)
            );
        }

        /// Property: allowed iff nothing is missing.
        #[test]
        fn allowed_iff_nothing_missing(
            granted in prop::collection::vec(permission(), 0..12),
            required in prop::collection::vec(permission(), 0..6),
        ) {
            let required = RequiredPermissions::new(required);
            prop_assert_eq!(
                check_permissions(&granted, &required),
                missing_permissions(&granted, &required).is_empty()
            );
        }
    }
}
