//! One-shot receiver for the OAuth redirect
//! (`/callback?jwtToken=&role=&email=&fullName=`).

use std::collections::HashMap;

use skincart_core::{Identity, Role, SessionToken};

use crate::error::AuthError;
use crate::navigator::Navigator;
use crate::session_store::SessionStore;
use crate::storage::Storage;

pub const PARAM_TOKEN: &str = "jwtToken";
pub const PARAM_ROLE: &str = "role";
pub const PARAM_EMAIL: &str = "email";
pub const PARAM_FULL_NAME: &str = "fullName";

/// Where the browser goes when the redirect is unusable.
pub const LOGIN_ERROR_ROUTE: &str = "/login?error=oauth_callback";

const REQUIRED: [&str; 4] = [PARAM_TOKEN, PARAM_ROLE, PARAM_EMAIL, PARAM_FULL_NAME];

/// The four redirect parameters, all present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackParams {
    pub token: SessionToken,
    /// Role exactly as received; unrecognized values are kept for logging.
    pub raw_role: String,
    pub email: String,
    pub full_name: String,
}

impl CallbackParams {
    /// Parse a query string (with or without the leading `?`).
    ///
    /// Returns the names of the missing parameters on failure.
    pub fn from_query(query: &str) -> Result<Self, Vec<&'static str>> {
        let mut values = parse_query(query);
        let missing: Vec<&'static str> = REQUIRED
            .into_iter()
            .filter(|name| values.get(*name).is_none_or(|v| v.trim().is_empty()))
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let mut take = |name: &str| values.remove(name).unwrap_or_default();
        Ok(Self {
            token: SessionToken::new(take(PARAM_TOKEN)),
            raw_role: take(PARAM_ROLE),
            email: take(PARAM_EMAIL),
            full_name: take(PARAM_FULL_NAME),
        })
    }

    pub fn role(&self) -> Role {
        Role::parse_lenient(&self.raw_role)
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.full_name.clone(), self.email.clone(), self.role())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Session persisted; the browser was sent to `route`.
    SignedIn { identity: Identity, route: &'static str },
    /// Nothing persisted; the browser was sent to the login error route.
    Rejected { missing: Vec<&'static str> },
}

/// Persist the redirect's identity and dispatch to the role landing route.
///
/// Missing parameters leave storage untouched.
pub fn receive_callback<S, N>(
    query: &str,
    store: &SessionStore<S>,
    navigator: &N,
) -> Result<CallbackOutcome, AuthError>
where
    S: Storage,
    N: Navigator + ?Sized,
{
    let params = match CallbackParams::from_query(query) {
        Ok(p) => p,
        Err(missing) => {
            tracing::warn!(?missing, "oauth callback missing parameters");
            navigator.navigate(LOGIN_ERROR_ROUTE);
            return Ok(CallbackOutcome::Rejected { missing });
        }
    };

    let role = params.role();
    if role.as_str() != params.raw_role.trim().to_ascii_uppercase() {
        tracing::warn!(role = %params.raw_role, "unrecognized role in oauth callback; using CUSTOMER");
    }

    let identity = params.identity();
    if let Err(e) = store.save(&identity, &params.token) {
        navigator.navigate(LOGIN_ERROR_ROUTE);
        return Err(e.into());
    }

    let route = role.landing_route();
    tracing::info!(%role, route, "oauth sign-in completed");
    navigator.navigate(route);

    Ok(CallbackOutcome::SignedIn { identity, route })
}

/// `a=1&b=x+y%21` -> `{a: "1", b: "x y!"}`. First occurrence of a key wins.
fn parse_query(query: &str) -> HashMap<String, String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut out = HashMap::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        let (Some(k), Some(v)) = (decode(k), decode(v)) else {
            continue;
        };
        out.entry(k).or_insert(v);
    }
    out
}

fn decode(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|v| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::{HistoryNavigator, Navigation};
    use crate::session_store::keys;
    use crate::storage::MemoryStorage;

    const FULL: &str = "?jwtToken=tok123&role=MANAGER&email=m%40shop.test&fullName=Mina+Park";

    fn setup() -> (MemoryStorage, SessionStore<MemoryStorage>, HistoryNavigator) {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        (storage, store, HistoryNavigator::new())
    }

    #[test]
    fn manager_is_persisted_and_sent_to_manager_dashboard() {
        let (storage, store, nav) = setup();
        let outcome = receive_callback(FULL, &store, &nav).unwrap();

        let CallbackOutcome::SignedIn { identity, route } = outcome else {
            panic!("expected sign-in");
        };
        assert_eq!(route, "/manager");
        assert_eq!(identity.display_name, "Mina Park");
        assert_eq!(identity.email, "m@shop.test");
        assert_eq!(nav.last(), Some(Navigation::Internal("/manager".to_string())));
        assert_eq!(storage.get(keys::TOKEN).unwrap().as_deref(), Some("tok123"));
        assert_eq!(storage.get(keys::ROLE).unwrap().as_deref(), Some("MANAGER"));
        assert_eq!(storage.get(keys::NAME).unwrap().as_deref(), Some("Mina Park"));
        assert_eq!(store.load().unwrap().unwrap().identity, identity);
    }

    #[test]
    fn staff_customer_and_unknown_roles_route_by_role() {
        for (role, expected) in [
            ("STAFF", "/staff"),
            ("CUSTOMER", "/"),
            ("SUPERUSER", "/"),
            ("staff", "/staff"),
        ] {
            let (_, store, nav) = setup();
            let query = format!("jwtToken=t&role={role}&email=a%40b.c&fullName=A");
            receive_callback(&query, &store, &nav).unwrap();
            assert_eq!(nav.last(), Some(Navigation::Internal(expected.to_string())), "role {role}");
        }
    }

    #[test]
    fn unknown_role_is_stored_as_customer() {
        let (storage, store, nav) = setup();
        receive_callback("jwtToken=t&role=ROOT&email=e&fullName=n", &store, &nav).unwrap();
        assert_eq!(storage.get(keys::ROLE).unwrap().as_deref(), Some("CUSTOMER"));
    }

    #[test]
    fn any_missing_parameter_leaves_storage_unchanged() {
        for dropped in REQUIRED {
            let (storage, store, nav) = setup();
            storage.set("unrelated", "keep").unwrap();
            let before = storage.snapshot();

            let query: String = [
                ("jwtToken", "t"),
                ("role", "MANAGER"),
                ("email", "e%40x.y"),
                ("fullName", "N"),
            ]
            .into_iter()
            .filter(|(k, _)| *k != dropped)
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

            let outcome = receive_callback(&query, &store, &nav).unwrap();
            assert_eq!(outcome, CallbackOutcome::Rejected { missing: vec![dropped] });
            assert_eq!(storage.snapshot(), before, "dropped {dropped}");
            assert_eq!(nav.history(), vec![Navigation::Internal(LOGIN_ERROR_ROUTE.to_string())]);
        }
    }

    #[test]
    fn empty_values_count_as_missing() {
        let (storage, store, nav) = setup();
        let outcome = receive_callback("jwtToken=&role=STAFF&email=e&fullName=n", &store, &nav).unwrap();
        assert_eq!(outcome, CallbackOutcome::Rejected { missing: vec![PARAM_TOKEN] });
        assert!(storage.is_empty());
    }

    #[test]
    fn first_duplicate_wins() {
        let params = CallbackParams::from_query("jwtToken=a&jwtToken=b&role=STAFF&email=e&fullName=n").unwrap();
        assert_eq!(params.token.as_str(), "a");
    }
}
