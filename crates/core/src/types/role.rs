//! Dashboard user roles.

use serde::{Deserialize, Serialize};

/// Role attached to a dashboard account.
///
/// The backend sends the role as a lowercase string. Strings outside the
/// known set deserialize to [`Role::Unknown`], which the access guard treats
/// with the most restrictive known permissions rather than rejecting the
/// whole session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to every section, including company management.
    Superadmin,
    /// Company owner; everything except the company section.
    Admin,
    /// Sales staff; no access to company, staff, or branch management.
    Staff,
    /// Branch account; same restrictions as staff.
    Branch,
    /// Any role string the client does not recognize.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Superadmin => write!(f, "superadmin"),
            Self::Admin => write!(f, "admin"),
            Self::Staff => write!(f, "staff"),
            Self::Branch => write!(f, "branch"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "superadmin" => Self::Superadmin,
            "admin" => Self::Admin,
            "staff" => Self::Staff,
            "branch" => Self::Branch,
            _ => Self::Unknown,
        })
    }
}
