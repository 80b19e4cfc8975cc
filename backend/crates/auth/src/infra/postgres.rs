//! PostgreSQL Repository Implementation

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::credential::{Credential, CredentialPatch, NewCredential};
use crate::domain::entity::profile::{NewProfile, Profile, ProfilePatch};
use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::value_object::{user_id::UserId, user_role::RoleHierarchy};
use crate::error::{AuthError, AuthResult};

const SELECT_COLUMNS: &str = r#"
    SELECT id, login, email, password, role, blocked, is_active,
           created_at, updated_at, deleted_at
    FROM tbl_users
"#;

const PROFILE_COLUMNS: &str = r#"
    id, first_name, second_name, last_name, birth_date, about, created_at, updated_at
"#;

/// Partial unique index on `email` for active rows
const ACTIVE_EMAIL_INDEX: &str = "idx_tbl_users_active_email";

/// PostgreSQL-backed store over `tbl_users` and `tbl_profiles`
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CredentialStore for PgCredentialStore {
    async fn get_by_login(&self, login: &str) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(&format!("{SELECT_COLUMNS} WHERE login = $1"))
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;

        row.map(CredentialRow::into_credential).transpose()
    }

    async fn get_by_id(&self, id: &UserId) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(CredentialRow::into_credential).transpose()
    }

    async fn get_active_by_email(&self, email: &str) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(&format!(
            "{SELECT_COLUMNS} WHERE email = $1 AND is_active = TRUE LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CredentialRow::into_credential).transpose()
    }

    async fn create(&self, new: NewCredential) -> AuthResult<Credential> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            INSERT INTO tbl_users (id, login, email, password, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, login, email, password, role, blocked, is_active,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(UserId::new().as_uuid())
        .bind(&new.login)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(new.role.name())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                if db.constraint() == Some(ACTIVE_EMAIL_INDEX) {
                    AuthError::EmailTaken
                } else {
                    AuthError::LoginTaken
                }
            }
            other => AuthError::Database(other),
        })?;

        row.into_credential()
    }

    async fn patch(&self, id: &UserId, patch: CredentialPatch) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            UPDATE tbl_users SET
                blocked = COALESCE($2, blocked),
                is_active = COALESCE($3, is_active),
                deleted_at = COALESCE($4, deleted_at),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, login, email, password, role, blocked, is_active,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(patch.blocked)
        .bind(patch.is_active)
        .bind(patch.deleted_at)
        .fetch_optional(&self.pool)
        .await?;

        if row.is_some() {
            tracing::debug!(user_id = %id, ?patch, "Credential patched");
        }

        row.map(CredentialRow::into_credential).transpose()
    }
}

impl ProfileStore for PgCredentialStore {
    async fn get_profile(&self, user_id: &UserId) -> AuthResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM tbl_profiles WHERE id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_profile))
    }

    async fn create_profile(&self, user_id: &UserId, new: NewProfile) -> AuthResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            INSERT INTO tbl_profiles (id, first_name, second_name, last_name, birth_date, about)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(&new.first_name)
        .bind(&new.second_name)
        .bind(&new.last_name)
        .bind(new.birth_date)
        .bind(&new.about)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                AuthError::UserNotFound
            }
            other => AuthError::Database(other),
        })?;

        Ok(row.into_profile())
    }

    async fn patch_profile(
        &self,
        user_id: &UserId,
        patch: ProfilePatch,
    ) -> AuthResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            UPDATE tbl_profiles SET
                first_name = COALESCE($2, first_name),
                second_name = COALESCE($3, second_name),
                last_name = COALESCE($4, last_name),
                birth_date = COALESCE($5, birth_date),
                about = COALESCE($6, about),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(&patch.first_name)
        .bind(&patch.second_name)
        .bind(&patch.last_name)
        .bind(patch.birth_date)
        .bind(&patch.about)
        .fetch_optional(&self.pool)
        .await?;

        if row.is_some() {
            tracing::debug!(user_id = %user_id, "Profile patched");
        }

        Ok(row.map(ProfileRow::into_profile))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    login: String,
    email: String,
    password: String,
    role: String,
    blocked: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl CredentialRow {
    fn into_credential(self) -> AuthResult<Credential> {
        let role = RoleHierarchy::lookup(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid stored role: {}", self.role)))?;

        Ok(Credential {
            id: UserId::from_uuid(self.id),
            login: self.login,
            email: self.email,
            password_hash: self.password,
            role,
            blocked: self.blocked,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    first_name: String,
    second_name: Option<String>,
    last_name: String,
    birth_date: NaiveDate,
    about: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self) -> Profile {
        Profile {
            user_id: UserId::from_uuid(self.id),
            first_name: self.first_name,
            second_name: self.second_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            about: self.about,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
