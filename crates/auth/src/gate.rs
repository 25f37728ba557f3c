//! Route gate: decides, per navigation, whether the current role may enter
//! a path.
//!
//! - No IO
//! - No panics
//! - One static allow list, enforced at the routing layer for every route

use skincart_core::Role;

/// Who may enter the paths under a rule's prefix.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any logged-in role.
    Authenticated,
    Roles(&'static [Role]),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub prefix: &'static str,
    pub access: Access,
}

impl RouteRule {
    pub const fn new(prefix: &'static str, access: Access) -> Self {
        Self { prefix, access }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(&'static str),
}

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";

/// Allow list used by the storefront.
pub const DEFAULT_RULES: &[RouteRule] = &[
    RouteRule::new("/manager", Access::Roles(&[Role::Manager])),
    RouteRule::new("/staff", Access::Roles(&[Role::Staff, Role::Manager])),
    RouteRule::new("/account", Access::Authenticated),
    RouteRule::new("/orders", Access::Authenticated),
    RouteRule::new("/checkout", Access::Authenticated),
];

#[derive(Debug, Clone)]
pub struct RouteGate {
    rules: Vec<RouteRule>,
}

impl Default for RouteGate {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec())
    }
}

impl RouteGate {
    /// Rules are matched longest prefix first, whatever order they are given in.
    pub fn new(mut rules: Vec<RouteRule>) -> Self {
        rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { rules }
    }

    pub fn access_for(&self, path: &str) -> Access {
        let path = normalize(path);
        self.rules
            .iter()
            .find(|r| under_prefix(path, r.prefix))
            .map(|r| r.access)
            .unwrap_or(Access::Public)
    }

    pub fn check(&self, path: &str, role: Option<Role>) -> GateDecision {
        let decision = match (self.access_for(path), role) {
            (Access::Public, _) => GateDecision::Allow,
            (_, None) => GateDecision::Redirect(LOGIN_ROUTE),
            (Access::Authenticated, Some(_)) => GateDecision::Allow,
            (Access::Roles(allowed), Some(role)) if allowed.contains(&role) => GateDecision::Allow,
            (Access::Roles(_), Some(_)) => GateDecision::Redirect(HOME_ROUTE),
        };

        if let GateDecision::Redirect(to) = decision {
            tracing::warn!(path, role = ?role, redirect = to, "route gate denied navigation");
        }
        decision
    }
}

/// Drop query/fragment and any trailing slash (except for the root).
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// Segment-aware prefix test: `/staff/orders` is under `/staff`,
/// `/staffing` is not.
fn under_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_routes_require_manager() {
        let gate = RouteGate::default();
        assert_eq!(gate.check("/manager", Some(Role::Manager)), GateDecision::Allow);
        assert_eq!(gate.check("/manager/users", Some(Role::Staff)), GateDecision::Redirect("/"));
        assert_eq!(gate.check("/manager/users", Some(Role::Customer)), GateDecision::Redirect("/"));
        assert_eq!(gate.check("/manager", None), GateDecision::Redirect("/login"));
    }

    #[test]
    fn staff_routes_admit_staff_and_managers() {
        let gate = RouteGate::default();
        assert_eq!(gate.check("/staff/orders", Some(Role::Staff)), GateDecision::Allow);
        assert_eq!(gate.check("/staff/orders", Some(Role::Manager)), GateDecision::Allow);
        assert_eq!(gate.check("/staff", Some(Role::Customer)), GateDecision::Redirect("/"));
    }

    #[test]
    fn account_routes_need_any_login() {
        let gate = RouteGate::default();
        assert_eq!(gate.check("/orders", Some(Role::Customer)), GateDecision::Allow);
        assert_eq!(gate.check("/checkout?step=2", None), GateDecision::Redirect("/login"));
    }

    #[test]
    fn public_routes_and_lookalike_prefixes_are_open() {
        let gate = RouteGate::default();
        assert_eq!(gate.check("/", None), GateDecision::Allow);
        assert_eq!(gate.check("/products/42", None), GateDecision::Allow);
        assert_eq!(gate.check("/managerial-tips", None), GateDecision::Allow);
        assert_eq!(gate.check("/staffing", None), GateDecision::Allow);
    }

    #[test]
    fn trailing_slash_and_fragment_are_ignored() {
        let gate = RouteGate::default();
        assert_eq!(gate.check("/manager/", Some(Role::Staff)), GateDecision::Redirect("/"));
        assert_eq!(gate.check("/staff#top", None), GateDecision::Redirect("/login"));
    }

    #[test]
    fn longest_prefix_wins() {
        let gate = RouteGate::new(vec![
            RouteRule::new("/staff", Access::Roles(&[Role::Staff])),
            RouteRule::new("/staff/public", Access::Public),
        ]);
        assert_eq!(gate.check("/staff/public/faq", None), GateDecision::Allow);
        assert_eq!(gate.check("/staff/other", None), GateDecision::Redirect("/login"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: nothing under /manager is reachable without the manager role.
            #[test]
            fn manager_tree_is_closed_to_others(tail in "(/[a-z0-9]{1,8}){0,3}", idx in 0usize..2) {
                let gate = RouteGate::default();
                let role = [Role::Customer, Role::Staff][idx];
                let path = format!("/manager{tail}");
                prop_assert_ne!(gate.check(&path, Some(role)), GateDecision::Allow);
                prop_assert_eq!(gate.check(&path, Some(Role::Manager)), GateDecision::Allow);
            }
        }
    }
}
