//! Role hierarchy
//!
//! Roles are plain values ordered by an explicit rank. The set is fixed at
//! compile time; nothing outside [`RoleHierarchy::ROLES`] can be a role.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, Display)]
#[display("{name}")]
pub struct Role {
    name: &'static str,
    rank: u8,
}

impl Role {
    pub const USER: Role = Role { name: "user", rank: 0 };
    pub const MODERATOR: Role = Role {
        name: "moderator",
        rank: 1,
    };
    pub const ADMIN: Role = Role { name: "admin", rank: 2 };

    /// External representation
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Position in the hierarchy, higher is more privileged
    #[inline]
    pub const fn rank(&self) -> u8 {
        self.rank
    }

    /// At least as privileged as `other`
    #[inline]
    pub fn is_at_least(&self, other: Role) -> bool {
        self.rank >= other.rank
    }
}

// Identity is the rank alone. Roles never compare against raw integers.
impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Role {}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl Hash for Role {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        RoleHierarchy::lookup(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown role: {name}")))
    }
}

/// Ordered lookup table over the fixed role set
pub struct RoleHierarchy;

impl RoleHierarchy {
    /// Every role, ascending by rank
    pub const ROLES: [Role; 3] = [Role::USER, Role::MODERATOR, Role::ADMIN];

    /// Case-sensitive lookup by name. Unknown names are `None`, never a default.
    pub fn lookup(name: &str) -> Option<Role> {
        Self::ROLES.iter().copied().find(|role| role.name == name)
    }

    pub fn compare(a: Role, b: Role) -> Ordering {
        a.rank.cmp(&b.rank)
    }
}
