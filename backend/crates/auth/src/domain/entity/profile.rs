//! Profile Entity
//!
//! Personal details attached one-to-one to an account. Created together with
//! the account at registration and shares its id.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Accepted input form for birth dates
pub const BIRTH_DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone)]
pub struct Profile {
    /// Same id as the owning account
    pub user_id: UserId,
    pub first_name: String,
    pub second_name: Option<String>,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub about: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Apply a patch in memory, bumping `updated_at`
    pub fn apply(&mut self, patch: &ProfilePatch, now: DateTime<Utc>) {
        if let Some(first_name) = &patch.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(second_name) = &patch.second_name {
            self.second_name = Some(second_name.clone());
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(birth_date) = patch.birth_date {
            self.birth_date = birth_date;
        }
        if let Some(about) = &patch.about {
            self.about = Some(about.clone());
        }
        self.updated_at = now;
    }
}

/// Fields of a profile about to be created
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub first_name: String,
    pub second_name: Option<String>,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub about: Option<String>,
}

/// Partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub about: Option<String>,
}

/// Parse a `DD-MM-YYYY` birth date
pub fn parse_birth_date(raw: &str) -> AuthResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), BIRTH_DATE_FORMAT).map_err(|_| AuthError::InvalidBirthDate)
}
