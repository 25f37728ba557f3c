//! Application state, built once in the shell and passed to every page as
//! a prop.

use std::rc::Rc;

use leptos::*;

use skincart_auth::{AuthSession, Navigator};
use skincart_client::{ApiClient, ClientConfig, ClientError, PaymentClient};
use skincart_core::Identity;

use crate::frontend::browser::{BrowserNavigator, BrowserStorage};

pub type Session = AuthSession<ApiClient, BrowserStorage, BrowserNavigator>;

/// Where an expired token sends the user.
pub const SESSION_EXPIRED_ROUTE: &str = "/login?error=session_expired";

#[derive(Clone)]
pub struct AppContext {
    pub session: Rc<Session>,
    pub payment: Rc<PaymentClient>,
    /// Reactive mirror of `session.current()`.
    pub identity: RwSignal<Option<Identity>>,
}

impl AppContext {
    pub fn new(config: ClientConfig, navigator: BrowserNavigator) -> Self {
        let payment = Rc::new(PaymentClient::new(config.clone()));
        let session = Rc::new(AuthSession::new(ApiClient::new(config), BrowserStorage, navigator));
        let identity = create_rw_signal(session.current());
        Self {
            session,
            payment,
            identity,
        }
    }

    /// API client carrying the current token, if any.
    pub fn api(&self) -> ApiClient {
        self.session.backend().authed(self.session.token())
    }

    pub fn sync(&self) {
        self.identity.set(self.session.current());
    }

    pub fn logout(&self) {
        if let Err(e) = self.session.logout() {
            tracing::warn!("logout: {e}");
        }
        self.sync();
    }

    /// Message for the page; a rejected token also ends the session.
    pub fn report(&self, error: &ClientError) -> String {
        tracing::warn!("request failed: {error}");
        if matches!(error, ClientError::Unauthorized) && self.session.is_authenticated() {
            self.logout();
            self.session.navigator().navigate(SESSION_EXPIRED_ROUTE);
        }
        error.to_string()
    }
}
