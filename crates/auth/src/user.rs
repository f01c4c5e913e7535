//! Persisted user record and its input shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use photoreport_core::{DomainError, DomainResult, Entity, UserId};

use crate::{AuthUser, PermissionKey};

pub const MIN_PASSWORD_LEN: usize = 8;

/// User record as held by the user store.
///
/// `password` is stored as submitted (see `CredentialVerifier`) and is never
/// serialized, so a `User` can be returned from handlers as-is.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    /// External identifier (identity card number); unique, used as login key.
    pub ci: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub permissions: Vec<PermissionKey>,
    pub avatar: Option<String>,
    /// Account flag carried for clients; login does not consult it.
    pub state: bool,
    pub created: DateTime<Utc>,
}

impl core::fmt::Debug for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("ci", &self.ci)
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .field("permissions", &self.permissions)
            .field("avatar", &self.avatar)
            .field("state", &self.state)
            .field("created", &self.created)
            .finish()
    }
}

impl User {
    /// Snapshot placed inside a token. Drops everything else, notably the password.
    pub fn to_auth_user(&self) -> AuthUser {
        AuthUser {
            id: self.id,
            ci: self.ci.clone(),
            name: self.name.clone(),
            permissions: self.permissions.clone(),
        }
    }

    pub fn apply(&mut self, patch: UserPatch) -> DomainResult<()> {
        patch.validate()?;
        if let Some(v) = patch.ci {
            self.ci = v;
        }
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.password {
            self.password = v;
        }
        if let Some(v) = patch.permissions {
            self.permissions = v;
        }
        if let Some(v) = patch.avatar {
            self.avatar = Some(v);
        }
        if let Some(v) = patch.state {
            self.state = v;
        }
        Ok(())
    }
}

impl Entity for User {
    const NAME: &'static str = "User";
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Body of `POST /users` and `PUT /users/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub ci: String,
    pub name: String,
    pub password: String,
    /// Absent means "grant the whole vocabulary".
    pub permissions: Option<Vec<PermissionKey>>,
    pub avatar: Option<String>,
    pub state: Option<bool>,
}

impl NewUser {
    pub fn validate(&self) -> DomainResult<()> {
        if self.ci.trim().is_empty() {
            return Err(DomainError::validation("ci must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name must not be empty"));
        }
        validate_password(&self.password)
    }

    /// Build the stored record under `id`.
    pub fn into_user(self, id: UserId, created: DateTime<Utc>) -> DomainResult<User> {
        self.validate()?;
        Ok(User {
            id,
            ci: self.ci,
            name: self.name,
            password: self.password,
            permissions: self
                .permissions
                .unwrap_or_else(|| PermissionKey::ALL.to_vec()),
            avatar: self.avatar,
            state: self.state.unwrap_or(true),
            created,
        })
    }
}

/// Body of `PATCH /users/:id` and `PATCH /users/my-account`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub ci: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub permissions: Option<Vec<PermissionKey>>,
    pub avatar: Option<String>,
    pub state: Option<bool>,
}

impl UserPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(ci) = &self.ci {
            if ci.trim().is_empty() {
                return Err(DomainError::validation("ci must not be empty"));
            }
        }
        match &self.password {
            Some(p) => validate_password(p),
            None => Ok(()),
        }
    }
}

fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
