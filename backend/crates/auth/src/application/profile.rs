//! Profile Use Case
//!
//! Read and edit the personal details attached to an account.

use std::sync::Arc;

use crate::domain::entity::profile::{Profile, ProfilePatch, parse_birth_date};
use crate::domain::repository::ProfileStore;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Profile edit. `None` leaves the field untouched.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub last_name: Option<String>,
    /// `DD-MM-YYYY`
    pub birth_date: Option<String>,
    pub about: Option<String>,
}

pub struct ProfileUseCase<S>
where
    S: ProfileStore,
{
    store: Arc<S>,
}

impl<S> ProfileUseCase<S>
where
    S: ProfileStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn get(&self, user_id: &UserId) -> AuthResult<Profile> {
        self.store
            .get_profile(user_id)
            .await?
            .ok_or(AuthError::ProfileNotFound)
    }

    pub async fn update(&self, user_id: &UserId, update: ProfileUpdate) -> AuthResult<Profile> {
        let birth_date = update
            .birth_date
            .as_deref()
            .map(parse_birth_date)
            .transpose()?;

        let patch = ProfilePatch {
            first_name: update.first_name,
            second_name: update.second_name,
            last_name: update.last_name,
            birth_date,
            about: update.about,
        };

        let profile = self
            .store
            .patch_profile(user_id, patch)
            .await?
            .ok_or(AuthError::ProfileNotFound)?;

        tracing::info!(user_id = %user_id, "Profile updated");

        Ok(profile)
    }
}
