//! Platform Crate - Technical Infrastructure
//!
//! Technical foundations with no domain knowledge:
//! - Cryptographic utilities (signing algorithm names, secret keys, random bytes)
//! - Password hashing (Argon2id)
//! - Bearer credential extraction from HTTP headers
//! - An injectable wall clock

pub mod bearer;
pub mod clock;
pub mod crypto;
pub mod password;
