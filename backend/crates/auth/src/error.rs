//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Messages are what the client sees. Two asymmetries are intentional:
//! an unknown login and a wrong password share one message, while a blocked
//! account gets its own.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization: Bearer <token>` header
    #[error("Did not get credentials")]
    MissingCredentials,

    /// Token could not be parsed at all
    #[error("Could not validate credentials")]
    MalformedToken,

    /// Token signature does not match the expected secret
    #[error("Could not validate credentials")]
    InvalidSignature,

    #[error("Token has expired")]
    ExpiredToken,

    /// Token subject no longer maps to an active account
    #[error("The user does not exist anymore")]
    UnknownOrInactiveUser,

    /// Unknown login or wrong password at login time
    #[error("Incorrect login or password")]
    IncorrectCredentials,

    #[error("User is blocked")]
    AccountBlocked,

    /// Role check failed
    #[error("Forbidden")]
    Forbidden,

    #[error("User not found")]
    UserNotFound,

    #[error("Profile not found")]
    ProfileNotFound,

    /// Birth date not in `DD-MM-YYYY` form
    #[error("Invalid birth date: expected DD-MM-YYYY")]
    InvalidBirthDate,

    #[error("Login is already used. Please choose different login")]
    LoginTaken,

    #[error("User with this email already exists")]
    EmailTaken,

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("{0}")]
    PasswordPolicy(#[from] platform::password::PasswordPolicyError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingCredentials
            | AuthError::UnknownOrInactiveUser
            | AuthError::IncorrectCredentials
            | AuthError::AccountBlocked
            | AuthError::LoginTaken
            | AuthError::EmailTaken
            | AuthError::UnknownRole(_)
            | AuthError::InvalidBirthDate
            | AuthError::PasswordPolicy(_) => ErrorKind::BadRequest,
            AuthError::ExpiredToken => ErrorKind::Unauthorized,
            AuthError::MalformedToken | AuthError::InvalidSignature | AuthError::Forbidden => {
                ErrorKind::Forbidden
            }
            AuthError::UserNotFound | AuthError::ProfileNotFound => ErrorKind::NotFound,
            AuthError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => {
                ErrorKind::ServiceUnavailable
            }
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Server-side details stay out of the message
    /// and travel as the source only.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Database(e) => AppError::from(e),
            AuthError::Internal(_) => AppError::internal("Internal server error").with_source(self),
            _ => AppError::new(self.kind(), self.to_string()).with_source(self),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::IncorrectCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountBlocked => {
                tracing::warn!("Access attempt on blocked account");
            }
            AuthError::InvalidSignature | AuthError::MalformedToken => {
                tracing::warn!(error = ?self, "Rejected token");
            }
            AuthError::Forbidden => {
                tracing::warn!("Role check denied request");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<platform::bearer::BearerError> for AuthError {
    fn from(_: platform::bearer::BearerError) -> Self {
        AuthError::MissingCredentials
    }
}
