//! In-memory credential and profile store
//!
//! Used by tests and local runs without a database. Same contract as the
//! PostgreSQL store, including the unique login, the active email and the
//! profile belonging to an existing account.

use std::collections::HashMap;
use std::sync::Arc;

use platform::clock::{Clock, SystemClock};
use tokio::sync::RwLock;

use crate::domain::entity::credential::{Credential, CredentialPatch, NewCredential};
use crate::domain::entity::profile::{NewProfile, Profile, ProfilePatch};
use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct InMemoryCredentialStore {
    credentials: Arc<RwLock<HashMap<UserId, Credential>>>,
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl InMemoryCredentialStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            credentials: Arc::new(RwLock::new(HashMap::new())),
            profiles: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    async fn get_by_login(&self, login: &str) -> AuthResult<Option<Credential>> {
        let credentials = self.credentials.read().await;
        Ok(credentials.values().find(|c| c.login == login).cloned())
    }

    async fn get_by_id(&self, id: &UserId) -> AuthResult<Option<Credential>> {
        Ok(self.credentials.read().await.get(id).cloned())
    }

    async fn get_active_by_email(&self, email: &str) -> AuthResult<Option<Credential>> {
        let credentials = self.credentials.read().await;
        Ok(credentials
            .values()
            .find(|c| c.is_active && c.email == email)
            .cloned())
    }

    async fn create(&self, new: NewCredential) -> AuthResult<Credential> {
        let mut credentials = self.credentials.write().await;
        if credentials.values().any(|c| c.login == new.login) {
            return Err(AuthError::LoginTaken);
        }
        if credentials
            .values()
            .any(|c| c.is_active && c.email == new.email)
        {
            return Err(AuthError::EmailTaken);
        }

        let now = self.clock.now();
        let credential = Credential {
            id: UserId::new(),
            login: new.login,
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            blocked: false,
            is_active: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        credentials.insert(credential.id, credential.clone());
        Ok(credential)
    }

    async fn patch(&self, id: &UserId, patch: CredentialPatch) -> AuthResult<Option<Credential>> {
        let mut credentials = self.credentials.write().await;
        let Some(credential) = credentials.get_mut(id) else {
            return Ok(None);
        };
        credential.apply(&patch, self.clock.now());
        Ok(Some(credential.clone()))
    }
}

impl ProfileStore for InMemoryCredentialStore {
    async fn get_profile(&self, user_id: &UserId) -> AuthResult<Option<Profile>> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn create_profile(&self, user_id: &UserId, new: NewProfile) -> AuthResult<Profile> {
        if !self.credentials.read().await.contains_key(user_id) {
            return Err(AuthError::UserNotFound);
        }

        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(user_id) {
            return Err(AuthError::Internal(format!(
                "profile already exists for {user_id}"
            )));
        }

        let now = self.clock.now();
        let profile = Profile {
            user_id: *user_id,
            first_name: new.first_name,
            second_name: new.second_name,
            last_name: new.last_name,
            birth_date: new.birth_date,
            about: new.about,
            created_at: now,
            updated_at: now,
        };
        profiles.insert(*user_id, profile.clone());
        Ok(profile)
    }

    async fn patch_profile(
        &self,
        user_id: &UserId,
        patch: ProfilePatch,
    ) -> AuthResult<Option<Profile>> {
        let mut profiles = self.profiles.write().await;
        let Some(profile) = profiles.get_mut(user_id) else {
            return Ok(None);
        };
        profile.apply(&patch, self.clock.now());
        Ok(Some(profile.clone()))
    }
}
