//! Auth (Authentication & Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Credentials, profiles, roles, the role check, store traits
//! - `application/` - Token codec, access guard, use cases
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router, guard middleware
//!
//! ## Features
//! - Registration, login with login + password
//! - Stateless signed access tokens (short-lived) and refresh tokens (long-lived)
//! - Ranked roles (User < Moderator < Admin) with a per-route minimum
//! - Self-action exemption for routes acting on the caller's own account
//! - Block/unblock and logical deletion of accounts
//! - One profile per account, created at registration
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - HMAC-signed JWTs (`jsonwebtoken`); access and refresh tokens use
//!   different secrets
//! - Account state is re-read on every request; blocked or deleted accounts
//!   lose access immediately even with an unexpired token
//! - No token revocation or refresh rotation

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::{AuthConfig, ConfigError};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryCredentialStore, PgCredentialStore};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
