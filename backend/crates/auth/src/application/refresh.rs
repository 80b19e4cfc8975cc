//! Refresh Token Use Case
//!
//! Mints a new access token from a valid refresh token. The refresh token
//! itself is returned unchanged; there is no rotation.

use std::sync::Arc;

use crate::application::token::{TokenCodec, TokenKind};
use crate::domain::repository::CredentialStore;
use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
pub struct RefreshOutput {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct RefreshTokenUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    codec: Arc<TokenCodec>,
}

impl<S> RefreshTokenUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>, codec: Arc<TokenCodec>) -> Self {
        Self { store, codec }
    }

    pub async fn execute(&self, refresh_token: String) -> AuthResult<RefreshOutput> {
        let claims = self.codec.verify(&refresh_token, TokenKind::Refresh)?;

        let credential = self
            .store
            .get_by_login(&claims.sub)
            .await?
            .ok_or(AuthError::UnknownOrInactiveUser)?;
        credential.ensure_can_authenticate()?;

        let access_token = self.codec.issue_access(&credential.login)?;

        tracing::info!(user_id = %credential.id, "Access token refreshed");

        Ok(RefreshOutput {
            access_token,
            refresh_token,
        })
    }
}
