//! Entities

pub mod auth_context;
pub mod credential;
pub mod profile;
