use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Role granted to an account by the backend.
///
/// Serialized in the backend's upper-case form (`"CUSTOMER"`, `"STAFF"`,
/// `"MANAGER"`), which is also the form written to durable storage.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    Customer,
    Staff,
    Manager,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Customer, Role::Staff, Role::Manager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Staff => "STAFF",
            Role::Manager => "MANAGER",
        }
    }

    /// Parse a role, falling back to `Customer` for anything unrecognized.
    ///
    /// Used where the value comes from outside (redirect query, stored
    /// strings) and an unknown role must degrade to the least privileged one.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Route a freshly authenticated user lands on.
    pub fn landing_route(&self) -> &'static str {
        match self {
            Role::Manager => "/manager",
            Role::Staff => "/staff",
            Role::Customer => "/",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CUSTOMER" => Ok(Role::Customer),
            "STAFF" => Ok(Role::Staff),
            "MANAGER" => Ok(Role::Manager),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!(" Staff ".parse::<Role>().unwrap(), Role::Staff);
    }

    #[test]
    fn unknown_role_is_rejected_strictly_and_demoted_leniently() {
        assert!(matches!("ADMIN".parse::<Role>(), Err(DomainError::InvalidRole(_))));
        assert_eq!(Role::parse_lenient("ADMIN"), Role::Customer);
        assert_eq!(Role::parse_lenient(""), Role::Customer);
    }

    #[test]
    fn landing_routes() {
        assert_eq!(Role::Manager.landing_route(), "/manager");
        assert_eq!(Role::Staff.landing_route(), "/staff");
        assert_eq!(Role::Customer.landing_route(), "/");
    }

    #[test]
    fn serde_uses_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Staff).unwrap(), "\"STAFF\"");
        let r: Role = serde_json::from_str("\"MANAGER\"").unwrap();
        assert_eq!(r, Role::Manager);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: Display and FromStr agree for every role.
            #[test]
            fn display_round_trips(idx in 0usize..3) {
                let role = Role::ALL[idx];
                prop_assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
            }

            /// Property: lenient parsing never fails and never escalates.
            #[test]
            fn lenient_parse_of_garbage_is_customer(s in "[a-z0-9_]{0,12}") {
                prop_assume!(!matches!(s.as_str(), "customer" | "staff" | "manager"));
                prop_assert_eq!(Role::parse_lenient(&s), Role::Customer);
            }
        }
    }
}
