//! Caller identity and role context supplied by the auth collaborator.

use super::{ParseRoleError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role attached to a caller by the authentication layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative control, including approval decisions.
    Admin,
    /// Team lead; may create and assign tasks.
    Lead,
    /// Regular team member; works assigned tasks.
    Member,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Lead => "lead",
            Self::Member => "member",
        }
    }

    /// Whether this role may create and assign tasks.
    #[must_use]
    pub const fn can_create_tasks(self) -> bool {
        matches!(self, Self::Admin | Self::Lead)
    }

    /// Whether this role may approve or reject submitted tasks.
    #[must_use]
    pub const fn can_decide_approvals(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "lead" => Ok(Self::Lead),
            "member" => Ok(Self::Member),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated caller passed into every authorized operation.
///
/// The pair of identity and role is taken at face value; verifying it is the
/// auth collaborator's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: UserId,
    role: Role,
}

impl Actor {
    /// Creates an actor from a verified identity and role.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns the caller's identity.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Whether the caller holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
