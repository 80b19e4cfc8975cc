//! Access Guard
//!
//! Turns an `Authorization` header into an [`AuthContext`] and applies a
//! [`RoleRequirement`]. Order of checks:
//!
//! 1. bearer header present and well formed
//! 2. access token verifies (signature, then expiry)
//! 3. subject resolves to an active, unblocked account
//! 4. role requirement, with the optional self-action exemption
//!
//! The first failure wins.

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::bearer;

use crate::application::token::{TokenCodec, TokenKind};
use crate::domain::entity::auth_context::AuthContext;
use crate::domain::policy::RoleRequirement;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

pub struct AccessGuard<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    codec: Arc<TokenCodec>,
}

impl<S> Clone for AccessGuard<S>
where
    S: CredentialStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            codec: Arc::clone(&self.codec),
        }
    }
}

impl<S> AccessGuard<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>, codec: Arc<TokenCodec>) -> Self {
        Self { store, codec }
    }

    /// Steps 1 to 3: identify the caller
    pub async fn authenticate(&self, headers: &HeaderMap) -> AuthResult<AuthContext> {
        let token = bearer::extract_bearer(headers)?;
        let claims = self.codec.verify(token, TokenKind::Access)?;

        let credential = self
            .store
            .get_by_login(&claims.sub)
            .await?
            .ok_or(AuthError::UnknownOrInactiveUser)?;
        credential.ensure_can_authenticate()?;

        Ok(AuthContext::from(&credential))
    }

    /// Step 4: pure role decision
    pub fn authorize(
        &self,
        ctx: &AuthContext,
        requirement: RoleRequirement,
        target: Option<&UserId>,
    ) -> AuthResult<()> {
        requirement.check(ctx, target)
    }

    /// All four steps
    pub async fn guard(
        &self,
        headers: &HeaderMap,
        requirement: RoleRequirement,
        target: Option<&UserId>,
    ) -> AuthResult<AuthContext> {
        let ctx = self.authenticate(headers).await?;
        self.authorize(&ctx, requirement, target)?;

        tracing::debug!(
            user_id = %ctx.user_id,
            role = %ctx.role,
            required = %requirement.required,
            "Request authorized"
        );

        Ok(ctx)
    }
}
