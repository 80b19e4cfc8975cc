//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::credential::Credential;
use crate::domain::entity::profile::Profile;
use crate::domain::value_object::{user_id::UserId, user_role::Role};

// ============================================================================
// Registration
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRequest {
    pub login: String,
    pub email: String,
    pub password: String,
    /// Role name: `user`, `moderator` or `admin`
    pub role: String,
    pub first_name: String,
    #[serde(default)]
    pub second_name: Option<String>,
    pub last_name: String,
    /// `DD-MM-YYYY`
    pub birth_date: String,
    #[serde(default)]
    pub about: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationResponse {
    pub user_id: UserId,
}

// ============================================================================
// Authentication
// ============================================================================

/// Login form (`application/x-www-form-urlencoded`)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: UserId,
    pub login: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

// ============================================================================
// Users
// ============================================================================

/// Account details. The password hash is never exposed.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub login: String,
    pub email: String,
    pub role: Role,
    pub blocked: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Credential> for UserResponse {
    fn from(c: Credential) -> Self {
        Self {
            id: c.id,
            login: c.login,
            email: c.email,
            role: c.role,
            blocked: c.blocked,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
            deleted_at: c.deleted_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockUserRequest {
    pub blocked: bool,
}

// ============================================================================
// Profiles
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: UserId,
    pub first_name: String,
    pub second_name: Option<String>,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub about: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.user_id,
            first_name: p.first_name,
            second_name: p.second_name,
            last_name: p.last_name,
            birth_date: p.birth_date,
            about: p.about,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Profile edit; absent fields are left as they are
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub last_name: Option<String>,
    /// `DD-MM-YYYY`
    pub birth_date: Option<String>,
    pub about: Option<String>,
}
