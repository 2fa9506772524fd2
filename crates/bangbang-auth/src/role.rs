//! Role hierarchy.
//!
//! Roles are totally ordered by their level:
//!
//! | Role | Level |
//! |------|-------|
//! | customer | 0 |
//! | staff | 1 |
//! | admin | 2 |
//! | superadmin | 3 |
//!
//! Sufficiency checks always compare levels ([`Role::satisfies`]). Only
//! superadmin-only operations use exact equality ([`Role::is_exactly`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Customer,
    Staff,
    Admin,
    Superadmin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Customer, Role::Staff, Role::Admin, Role::Superadmin];

    /// Hierarchy level (higher number = more privileges).
    pub const fn level(self) -> u8 {
        match self {
            Role::Customer => 0,
            Role::Staff => 1,
            Role::Admin => 2,
            Role::Superadmin => 3,
        }
    }

    /// True when this role is at least as privileged as `minimum`.
    pub const fn satisfies(self, minimum: Role) -> bool {
        self.level() >= minimum.level()
    }

    pub fn is_exactly(self, required: Role) -> bool {
        self == required
    }

    /// Roles that belong to the back office (everything above customer).
    pub const fn is_back_office(self) -> bool {
        self.satisfies(Role::Staff)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Staff => "staff",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an endpoint demands of the caller's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Level comparison: the caller's level must be `>=` this role's.
    AtLeast(Role),
    /// Exact match, used for superadmin-only operations.
    Exactly(Role),
}

impl RoleRequirement {
    pub fn is_met_by(self, role: Role) -> bool {
        match self {
            RoleRequirement::AtLeast(minimum) => role.satisfies(minimum),
            RoleRequirement::Exactly(required) => role.is_exactly(required),
        }
    }
}

impl fmt::Display for RoleRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleRequirement::AtLeast(role) => write!(f, "{} or above", role),
            RoleRequirement::Exactly(role) => write!(f, "{} only", role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
