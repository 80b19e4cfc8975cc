//! User Administration Use Case
//!
//! Read, block/unblock and logically delete accounts by id. Authorization
//! happens before these run; this layer only talks to the store.

use std::sync::Arc;

use platform::clock::Clock;

use crate::domain::entity::credential::{Credential, CredentialPatch};
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

pub struct UserAdminUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> UserAdminUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn get(&self, id: &UserId) -> AuthResult<Credential> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn set_blocked(&self, id: &UserId, blocked: bool) -> AuthResult<Credential> {
        let credential = self
            .store
            .patch(id, CredentialPatch::set_blocked(blocked))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %id, blocked, "User block state changed");

        Ok(credential)
    }

    /// Logical delete. The row stays; the account can no longer authenticate.
    pub async fn delete(&self, id: &UserId) -> AuthResult<()> {
        self.store
            .patch(id, CredentialPatch::logical_delete(self.clock.now()))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
