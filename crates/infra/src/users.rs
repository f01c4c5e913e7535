//! In-memory user store with `ci` uniqueness.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use photoreport_auth::{NewUser, User, UserPatch, UserStore};
use photoreport_core::{DomainError, DomainResult, Entity, UserId};

use crate::read_model::{EntityStore, InMemoryEntityStore};

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: InMemoryEntityStore<User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, input: NewUser) -> DomainResult<User> {
        let user = input.into_user(UserId::new(), Utc::now())?;
        self.users.write_with(|map| {
            ensure_ci_free(map, &user.ci, None)?;
            map.insert(user.id, user.clone());
            Ok(())
        })?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub fn get(&self, id: &UserId) -> DomainResult<User> {
        self.users.get(id)?.ok_or_else(|| User::not_found(id))
    }

    pub fn list(&self) -> DomainResult<Vec<User>> {
        let mut users = self.users.list()?;
        users.sort_by_key(|u| u.created);
        Ok(users)
    }

    pub fn count(&self) -> DomainResult<usize> {
        self.users.count()
    }

    pub fn update(&self, id: &UserId, patch: UserPatch) -> DomainResult<User> {
        self.users.write_with(|map| {
            let mut user = map.get(id).cloned().ok_or_else(|| User::not_found(id))?;
            if let Some(ci) = &patch.ci {
                ensure_ci_free(map, ci, Some(id))?;
            }
            user.apply(patch)?;
            map.insert(user.id, user.clone());
            Ok(user)
        })
    }

    /// Full replacement; `id` and `created` are kept.
    pub fn replace(&self, id: &UserId, input: NewUser) -> DomainResult<User> {
        self.users.write_with(|map| {
            let existing = map.get(id).ok_or_else(|| User::not_found(id))?;
            let user = input.into_user(existing.id, existing.created)?;
            ensure_ci_free(map, &user.ci, Some(id))?;
            map.insert(user.id, user.clone());
            Ok(user)
        })
    }

    pub fn delete(&self, id: &UserId) -> DomainResult<()> {
        self.users.remove(id)?.ok_or_else(|| User::not_found(id))?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

/// `ci` must identify at most one user; `except` is the record being rewritten.
fn ensure_ci_free(users: &HashMap<UserId, User>, ci: &str, except: Option<&UserId>) -> DomainResult<()> {
    if users.values().any(|u| u.ci == ci && Some(&u.id) != except) {
        return Err(DomainError::conflict(format!("a user with ci {ci} already exists")));
    }
    Ok(())
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_ci(&self, ci: &str) -> DomainResult<Option<User>> {
        Ok(self.users.list()?.into_iter().find(|u| u.ci == ci))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use photoreport_auth::PermissionKey;

    use super::*;

    fn input(ci: &str) -> NewUser {
        NewUser {
            ci: ci.into(),
            name: format!("user {ci}"),
            password: "password123".into(),
            permissions: None,
            avatar: None,
            state: None,
        }
    }

    #[tokio::test]
    async fn created_user_is_found_by_ci() {
        let store = InMemoryUserStore::new();
        let created = store.create(input("123")).unwrap();

        let found = store.find_by_ci("123").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(store.find_by_ci("999").await.unwrap().is_none());
    }

    #[test]
    fn duplicate_ci_is_a_conflict() {
        let store = InMemoryUserStore::new();
        store.create(input("123")).unwrap();
        assert!(matches!(store.create(input("123")), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn concurrent_creates_with_one_ci_admit_a_single_user() {
        for _ in 0..50 {
            let store = Arc::new(InMemoryUserStore::new());
            let barrier = Arc::new(Barrier::new(8));
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let store = store.clone();
                    let barrier = barrier.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        store.create(input("123")).is_ok()
                    })
                })
                .collect();

            let created = handles.into_iter().map(|h| h.join().unwrap()).filter(|ok| *ok).count();
            assert_eq!(created, 1);
            assert_eq!(store.count().unwrap(), 1);
        }
    }

    #[test]
    fn update_cannot_steal_another_ci() {
        let store = InMemoryUserStore::new();
        store.create(input("1")).unwrap();
        let b = store.create(input("2")).unwrap();

        let patch = UserPatch {
            ci: Some("1".into()),
            ..Default::default()
        };
        assert!(matches!(store.update(&b.id, patch), Err(DomainError::Conflict(_))));

        // Re-asserting one's own ci is fine.
        let patch = UserPatch {
            ci: Some("2".into()),
            permissions: Some(vec![PermissionKey::ViewUser]),
            ..Default::default()
        };
        let updated = store.update(&b.id, patch).unwrap();
        assert_eq!(updated.permissions, vec![PermissionKey::ViewUser]);
    }

    #[test]
    fn replace_keeps_identity_and_resets_defaults() {
        let store = InMemoryUserStore::new();
        let mut first = input("1");
        first.permissions = Some(vec![]);
        let original = store.create(first).unwrap();

        let replaced = store.replace(&original.id, input("1")).unwrap();
        assert_eq!(replaced.id, original.id);
        assert_eq!(replaced.created, original.created);
        assert_eq!(replaced.permissions, PermissionKey::ALL.to_vec());
    }

    #[test]
    fn delete_missing_user_is_not_found() {
        let store = InMemoryUserStore::new();
        let id = UserId::new();
        assert!(matches!(store.delete(&id), Err(DomainError::NotFound(_))));
        assert!(matches!(store.get(&id), Err(DomainError::NotFound(_))));
    }
}
