//! Value Objects

pub mod user_id;
pub mod user_role;

pub use user_id::UserId;
pub use user_role::{Role, RoleHierarchy};
