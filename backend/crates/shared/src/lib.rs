//! Shared Kernel
//!
//! Vocabulary shared by every crate in the workspace:
//! - The error classification and the HTTP problem-details error type
//! - Typed ID wrappers
//!
//! Only things whose meaning is identical across domains live here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
