//! Credential Entity
//!
//! An account record as held by the credential store.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{user_id::UserId, user_role::Role};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct Credential {
    pub id: UserId,
    /// Unique login, also the token subject
    pub login: String,
    pub email: String,
    /// PHC-formatted password hash
    pub password_hash: String,
    pub role: Role,
    pub blocked: bool,
    /// `false` once logically deleted
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Whether a token for this account may still be honoured.
    ///
    /// A deleted account reads as unknown even when it is also blocked.
    pub fn ensure_can_authenticate(&self) -> AuthResult<()> {
        if !self.is_active {
            return Err(AuthError::UnknownOrInactiveUser);
        }
        if self.blocked {
            return Err(AuthError::AccountBlocked);
        }
        Ok(())
    }

    /// Apply a patch in memory, bumping `updated_at`
    pub fn apply(&mut self, patch: &CredentialPatch, now: DateTime<Utc>) {
        if let Some(blocked) = patch.blocked {
            self.blocked = blocked;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(deleted_at) = patch.deleted_at {
            self.deleted_at = Some(deleted_at);
        }
        self.updated_at = now;
    }
}

/// Fields of a credential about to be created
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub login: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialPatch {
    pub blocked: Option<bool>,
    pub is_active: Option<bool>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl CredentialPatch {
    pub fn set_blocked(blocked: bool) -> Self {
        Self {
            blocked: Some(blocked),
            ..Self::default()
        }
    }

    /// Logical deletion; the row is kept
    pub fn logical_delete(at: DateTime<Utc>) -> Self {
        Self {
            is_active: Some(false),
            deleted_at: Some(at),
            ..Self::default()
        }
    }
}
