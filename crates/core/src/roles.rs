//! Well-known role name constants.
//!
//! These must match the seed data in `20261001000001_create_users_and_roles.sql`.

use serde::{Deserialize, Serialize};

pub const ROLE_BRAND_USER: &str = "brand_user";
pub const ROLE_MERCH_OPS: &str = "merch_ops";

/// All role names known to the access policy.
pub const VALID_ROLES: &[&str] = &[ROLE_BRAND_USER, ROLE_MERCH_OPS];

/// A role a user can be a member of. Users may hold several at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Brand-side users who author notes.
    BrandUser,
    /// Merchandising operations staff with full note visibility.
    MerchOps,
}

impl Role {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_BRAND_USER => Ok(Self::BrandUser),
            ROLE_MERCH_OPS => Ok(Self::MerchOps),
            _ => Err(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BrandUser => ROLE_BRAND_USER,
            Self::MerchOps => ROLE_MERCH_OPS,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse role names, silently dropping any the policy does not know about.
///
/// Unknown names can appear when roles are added in the database ahead of a
/// deploy; they grant nothing.
pub fn parse_role_names<S: AsRef<str>>(names: &[S]) -> Vec<Role> {
    let mut roles = Vec::with_capacity(names.len());
    for role in names.iter().filter_map(|n| Role::from_str_value(n.as_ref()).ok()) {
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    roles
}
