//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod guard;
pub mod login;
pub mod profile;
pub mod refresh;
pub mod registration;
pub mod token;
pub mod user_admin;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use config::{AuthConfig, ConfigError};
pub use guard::AccessGuard;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use profile::{ProfileUpdate, ProfileUseCase};
pub use refresh::{RefreshOutput, RefreshTokenUseCase};
pub use registration::{RegisterUseCase, RegistrationInput};
pub use token::{TokenClaims, TokenCodec, TokenKind};
pub use user_admin::UserAdminUseCase;
