//! Domain Layer
//!
//! Entities, value objects, the role check policy and the store traits.

pub mod entity;
pub mod policy;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{auth_context::AuthContext, credential::Credential, profile::Profile};
pub use policy::RoleRequirement;
pub use repository::{CredentialStore, ProfileStore};
