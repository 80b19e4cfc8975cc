//! Registration Use Case
//!
//! Creates a new account and its profile.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordHasher};

use crate::domain::entity::credential::NewCredential;
use crate::domain::entity::profile::{NewProfile, parse_birth_date};
use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::value_object::{user_id::UserId, user_role::RoleHierarchy};
use crate::error::{AuthError, AuthResult};

/// Registration input
pub struct RegistrationInput {
    pub login: String,
    pub email: String,
    pub password: String,
    /// Role name, resolved through [`RoleHierarchy::lookup`]
    pub role: String,
    pub first_name: String,
    pub second_name: Option<String>,
    pub last_name: String,
    /// `DD-MM-YYYY`
    pub birth_date: String,
    pub about: Option<String>,
}

pub struct RegisterUseCase<S>
where
    S: CredentialStore + ProfileStore,
{
    store: Arc<S>,
    hasher: Arc<PasswordHasher>,
}

impl<S> RegisterUseCase<S>
where
    S: CredentialStore + ProfileStore,
{
    pub fn new(store: Arc<S>, hasher: Arc<PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    pub async fn execute(&self, input: RegistrationInput) -> AuthResult<UserId> {
        if self.store.get_by_login(&input.login).await?.is_some() {
            return Err(AuthError::LoginTaken);
        }
        if self
            .store
            .get_active_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(AuthError::EmailTaken);
        }

        let role = RoleHierarchy::lookup(&input.role)
            .ok_or_else(|| AuthError::UnknownRole(input.role.clone()))?;

        let password = ClearTextPassword::for_registration(input.password)?;
        let birth_date = parse_birth_date(&input.birth_date)?;
        let password_hash = self.hasher.hash(&password)?;

        // The store enforces login uniqueness again for concurrent registrations
        let credential = self
            .store
            .create(NewCredential {
                login: input.login,
                email: input.email,
                password_hash: password_hash.into_phc_string(),
                role,
            })
            .await?;

        self.store
            .create_profile(
                &credential.id,
                NewProfile {
                    first_name: input.first_name,
                    second_name: input.second_name,
                    last_name: input.last_name,
                    birth_date,
                    about: input.about,
                },
            )
            .await?;

        tracing::info!(
            user_id = %credential.id,
            role = %credential.role,
            "User registered"
        );

        Ok(credential.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::Harness;
    use crate::domain::entity::credential::CredentialPatch;
    use crate::domain::value_object::user_role::Role;
    use crate::infra::InMemoryCredentialStore;
    use platform::clock::Clock;

    fn register_use_case(h: &Harness) -> RegisterUseCase<InMemoryCredentialStore> {
        RegisterUseCase::new(h.store.clone(), h.hasher.clone())
    }

    fn input(login: &str, email: &str, role: &str) -> RegistrationInput {
        RegistrationInput {
            login: login.to_string(),
            email: email.to_string(),
            password: "s3cret-pass".to_string(),
            role: role.to_string(),
            first_name: "Alice".to_string(),
            second_name: None,
            last_name: "Liddell".to_string(),
            birth_date: "04-05-1990".to_string(),
            about: Some("Curious".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_creates_active_account() {
        let h = Harness::new();
        let id = register_use_case(&h)
            .execute(input("alice", "alice@example.com", "moderator"))
            .await
            .unwrap();

        let stored = h.store.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.login, "alice");
        assert_eq!(stored.role, Role::MODERATOR);
        assert!(stored.is_active);
        assert!(!stored.blocked);
        assert!(stored.password_hash.starts_with("$argon2"));
        assert!(h.hasher.verify(
            &ClearTextPassword::new("s3cret-pass".to_string()),
            &stored.password_hash
        ));

        let profile = h.store.get_profile(&id).await.unwrap().unwrap();
        assert_eq!(profile.first_name, "Alice");
        assert_eq!(profile.birth_date.to_string(), "1990-05-04");
        assert_eq!(profile.about.as_deref(), Some("Curious"));
    }

    #[tokio::test]
    async fn test_login_taken() {
        let h = Harness::new();
        h.add_user("alice", "pw", Role::USER).await;
        let err = register_use_case(&h)
            .execute(input("alice", "other@example.com", "user"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::LoginTaken));
    }

    #[tokio::test]
    async fn test_email_taken_only_by_active_account() {
        let h = Harness::new();
        let alice = h.add_user("alice", "pw", Role::USER).await;
        let use_case = register_use_case(&h);

        let err = use_case
            .execute(input("alice2", "alice@example.com", "user"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));

        h.patch(&alice, CredentialPatch::logical_delete(h.clock.now()))
            .await;
        assert!(
            use_case
                .execute(input("alice2", "alice@example.com", "user"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_unknown_role_is_not_defaulted() {
        let h = Harness::new();
        let err = register_use_case(&h)
            .execute(input("alice", "alice@example.com", "Admin"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UnknownRole(ref r) if r == "Admin"));
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_empty_password_rejected() {
        let h = Harness::new();
        let mut bad = input("alice", "alice@example.com", "user");
        bad.password = String::new();
        let err = register_use_case(&h).execute(bad).await.unwrap_err();
        assert!(matches!(err, AuthError::PasswordPolicy(_)));
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_bad_birth_date_creates_nothing() {
        let h = Harness::new();
        let mut bad = input("alice", "alice@example.com", "user");
        bad.birth_date = "1990-05-04".to_string();
        let err = register_use_case(&h).execute(bad).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidBirthDate));
        assert!(h.store.is_empty().await);
    }
}
