//! Account identifier

pub use kernel::id::UserId;
