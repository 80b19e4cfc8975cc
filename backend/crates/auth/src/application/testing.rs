//! Shared fixtures for use case tests

use std::sync::Arc;

use chrono::NaiveDate;
use platform::clock::ManualClock;
use platform::password::{ClearTextPassword, PasswordHasher};

use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::domain::entity::credential::{Credential, CredentialPatch, NewCredential};
use crate::domain::entity::profile::NewProfile;
use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::value_object::user_role::Role;
use crate::infra::memory::InMemoryCredentialStore;

pub(crate) struct Harness {
    pub clock: Arc<ManualClock>,
    pub store: Arc<InMemoryCredentialStore>,
    pub codec: Arc<TokenCodec>,
    pub hasher: Arc<PasswordHasher>,
}

impl Harness {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::starting_now());
        Self {
            store: Arc::new(InMemoryCredentialStore::new(clock.clone())),
            codec: Arc::new(TokenCodec::new(&AuthConfig::development(), clock.clone())),
            hasher: Arc::new(PasswordHasher::new()),
            clock,
        }
    }

    /// Account plus a profile named "Alice Liddell"
    pub async fn add_user(&self, login: &str, password: &str, role: Role) -> Credential {
        let hash = self
            .hasher
            .hash(&ClearTextPassword::new(password.to_string()))
            .unwrap();
        let credential = self
            .store
            .create(NewCredential {
                login: login.to_string(),
                email: format!("{login}@example.com"),
                password_hash: hash.into_phc_string(),
                role,
            })
            .await
            .unwrap();
        self.store
            .create_profile(
                &credential.id,
                NewProfile {
                    first_name: "Alice".to_string(),
                    second_name: None,
                    last_name: "Liddell".to_string(),
                    birth_date: NaiveDate::from_ymd_opt(1990, 5, 4).unwrap(),
                    about: None,
                },
            )
            .await
            .unwrap();
        credential
    }

    pub async fn patch(&self, credential: &Credential, patch: CredentialPatch) {
        self.store.patch(&credential.id, patch).await.unwrap();
    }
}
