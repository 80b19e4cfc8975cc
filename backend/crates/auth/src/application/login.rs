//! Login Use Case
//!
//! Exchanges a login and password for an access/refresh token pair.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordHasher};

use crate::application::token::TokenCodec;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{user_id::UserId, user_role::Role};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: ClearTextPassword,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: UserId,
    pub login: String,
    pub role: Role,
}

/// Login use case
pub struct LoginUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    codec: Arc<TokenCodec>,
    hasher: Arc<PasswordHasher>,
}

impl<S> LoginUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>, codec: Arc<TokenCodec>, hasher: Arc<PasswordHasher>) -> Self {
        Self {
            store,
            codec,
            hasher,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let credential = self
            .store
            .get_by_login(&input.username)
            .await?
            .ok_or(AuthError::IncorrectCredentials)?;

        // Blocked accounts learn that they are blocked, before any password check
        if credential.blocked {
            return Err(AuthError::AccountBlocked);
        }
        if !credential.is_active {
            return Err(AuthError::UnknownOrInactiveUser);
        }

        if !self
            .hasher
            .verify(&input.password, &credential.password_hash)
        {
            tracing::warn!(user_id = %credential.id, "Password mismatch");
            return Err(AuthError::IncorrectCredentials);
        }

        let access_token = self.codec.issue_access(&credential.login)?;
        let refresh_token = self.codec.issue_refresh(&credential.login)?;

        tracing::info!(
            user_id = %credential.id,
            role = %credential.role,
            "User logged in"
        );

        Ok(LoginOutput {
            access_token,
            refresh_token,
            user_id: credential.id,
            login: credential.login,
            role: credential.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::Harness;
    use crate::application::token::TokenKind;
    use crate::domain::entity::credential::CredentialPatch;
    use platform::clock::Clock;

    fn login_use_case(h: &Harness) -> LoginUseCase<crate::infra::InMemoryCredentialStore> {
        LoginUseCase::new(h.store.clone(), h.codec.clone(), h.hasher.clone())
    }

    fn input(username: &str, password: &str) -> LoginInput {
        LoginInput {
            username: username.to_string(),
            password: ClearTextPassword::new(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_login_issues_token_pair() {
        let h = Harness::new();
        let alice = h.add_user("alice", "correct horse", Role::MODERATOR).await;

        let out = login_use_case(&h)
            .execute(input("alice", "correct horse"))
            .await
            .unwrap();
        assert_eq!(out.user_id, alice.id);
        assert_eq!(out.login, "alice");
        assert_eq!(out.role, Role::MODERATOR);

        let now = h.clock.now().timestamp();
        let access = h.codec.verify(&out.access_token, TokenKind::Access).unwrap();
        let refresh = h.codec.verify(&out.refresh_token, TokenKind::Refresh).unwrap();
        assert_eq!(access.sub, "alice");
        assert_eq!(access.exp, now + 5 * 60);
        assert_eq!(refresh.exp, now + 24 * 3600);
    }

    #[tokio::test]
    async fn test_unknown_login_and_wrong_password_look_alike() {
        let h = Harness::new();
        h.add_user("alice", "correct horse", Role::USER).await;
        let use_case = login_use_case(&h);

        let unknown = use_case.execute(input("bob", "correct horse")).await.unwrap_err();
        let wrong = use_case.execute(input("alice", "battery staple")).await.unwrap_err();
        assert!(matches!(unknown, AuthError::IncorrectCredentials));
        assert!(matches!(wrong, AuthError::IncorrectCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_blocked_account_gets_distinct_error() {
        let h = Harness::new();
        let alice = h.add_user("alice", "correct horse", Role::USER).await;
        h.patch(&alice, CredentialPatch::set_blocked(true)).await;

        // Even with the wrong password
        let err = login_use_case(&h)
            .execute(input("alice", "nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AccountBlocked));
        assert_eq!(err.to_string(), "User is blocked");
    }

    #[tokio::test]
    async fn test_deleted_account_rejected() {
        let h = Harness::new();
        let alice = h.add_user("alice", "correct horse", Role::USER).await;
        h.patch(&alice, CredentialPatch::logical_delete(h.clock.now()))
            .await;

        let err = login_use_case(&h)
            .execute(input("alice", "correct horse"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UnknownOrInactiveUser));
    }
}
