//! Menu entries and login-page notices.

use skincart_auth::{GateDecision, RouteGate};
use skincart_auth::callback::LOGIN_ERROR_ROUTE;
use skincart_core::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

const MENU: &[NavLink] = &[
    NavLink { label: "Shop", href: "/" },
    NavLink { label: "Skin quiz", href: "/quiz" },
    NavLink { label: "Cart", href: "/cart" },
    NavLink { label: "My orders", href: "/orders" },
    NavLink { label: "Account", href: "/account" },
    NavLink { label: "Staff", href: "/staff" },
    NavLink { label: "Manager", href: "/manager" },
];

/// Menu entries the gate would let `role` open, in display order.
///
/// The cart is listed only for signed-in users even though its route is
/// public; anonymous visitors get "Sign in" instead.
pub fn links_for(gate: &RouteGate, role: Option<Role>) -> Vec<NavLink> {
    let mut links: Vec<NavLink> = MENU
        .iter()
        .copied()
        .filter(|l| gate.check(l.href, role) == GateDecision::Allow)
        .filter(|l| role.is_some() || l.href != "/cart")
        .collect();
    if role.is_none() {
        links.push(NavLink { label: "Sign in", href: "/login" });
    }
    links
}

/// Text shown above the login form for the `error` query parameter.
pub fn login_notice(error: Option<&str>) -> Option<&'static str> {
    match error? {
        "oauth_callback" => Some("Google sign-in did not complete. Please try again."),
        "session_expired" => Some("Your session has expired. Please sign in again."),
        "" => None,
        _ => Some("Sign-in failed. Please try again."),
    }
}

/// `error` value the callback appends when it rejects a redirect.
pub fn callback_error_code() -> &'static str {
    LOGIN_ERROR_ROUTE
        .split_once("error=")
        .map(|(_, code)| code)
        .unwrap_or_default()
}
