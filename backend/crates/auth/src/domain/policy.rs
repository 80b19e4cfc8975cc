//! Role check
//!
//! Pure authorization decision made after the caller is authenticated.
//! No I/O, no mutation.

use crate::domain::entity::auth_context::AuthContext;
use crate::domain::value_object::{user_id::UserId, user_role::Role};
use crate::error::{AuthError, AuthResult};

/// Minimum role for a route, optionally relaxed for actions on oneself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRequirement {
    pub required: Role,
    pub self_action: bool,
}

impl RoleRequirement {
    /// Caller must hold `required` or higher
    pub const fn at_least(required: Role) -> Self {
        Self {
            required,
            self_action: false,
        }
    }

    /// Caller must hold `required` or higher, or be the target user
    pub const fn at_least_or_self(required: Role) -> Self {
        Self {
            required,
            self_action: true,
        }
    }

    /// Decide whether `ctx` may act on `target`.
    ///
    /// The self-action exemption applies only when the caller ranks strictly
    /// below `required`; a sufficient role never consults the target.
    pub fn check(&self, ctx: &AuthContext, target: Option<&UserId>) -> AuthResult<()> {
        let sufficient = ctx.role.is_at_least(self.required);

        if self.self_action && !sufficient {
            return match target {
                Some(target) if *target == ctx.user_id => Ok(()),
                _ => Err(AuthError::Forbidden),
            };
        }

        if sufficient {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}
