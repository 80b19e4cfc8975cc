//! Repository Traits
//!
//! Interfaces to account and profile persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::credential::{Credential, CredentialPatch, NewCredential};
use crate::domain::entity::profile::{NewProfile, Profile, ProfilePatch};
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Find by login (exact match)
    async fn get_by_login(&self, login: &str) -> AuthResult<Option<Credential>>;

    async fn get_by_id(&self, id: &UserId) -> AuthResult<Option<Credential>>;

    /// Find an active account using this email
    async fn get_active_by_email(&self, email: &str) -> AuthResult<Option<Credential>>;

    /// Insert a new account. Fails with `LoginTaken` if the login exists,
    /// `EmailTaken` if an active account uses the email.
    async fn create(&self, new: NewCredential) -> AuthResult<Credential>;

    /// Apply a partial update. `None` if no account has this id.
    async fn patch(&self, id: &UserId, patch: CredentialPatch) -> AuthResult<Option<Credential>>;
}

/// Profile store, keyed by the owning account's id
#[trait_variant::make(ProfileStore: Send)]
pub trait LocalProfileStore {
    async fn get_profile(&self, user_id: &UserId) -> AuthResult<Option<Profile>>;

    /// Insert the profile of an existing account. Fails with `UserNotFound`
    /// if no account has this id.
    async fn create_profile(&self, user_id: &UserId, new: NewProfile) -> AuthResult<Profile>;

    /// Apply a partial update. `None` if the account has no profile.
    async fn patch_profile(
        &self,
        user_id: &UserId,
        patch: ProfilePatch,
    ) -> AuthResult<Option<Profile>>;
}
