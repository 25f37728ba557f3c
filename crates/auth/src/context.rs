//! The session object: single source of truth for who is logged in.
//!
//! Constructed once at startup and passed to whoever needs it; there is no
//! ambient global. Single-threaded by construction (interior `RefCell`).

use std::cell::RefCell;

use skincart_core::{Identity, Role, SessionToken};

use crate::backend::{AuthBackend, AuthGrant, Credentials, SignUp};
use crate::callback::{CallbackOutcome, receive_callback};
use crate::error::AuthError;
use crate::gate::{GateDecision, RouteGate};
use crate::navigator::Navigator;
use crate::session_store::{SessionStore, StoredSession};
use crate::storage::Storage;

pub struct AuthSession<B, S, N> {
    backend: B,
    store: SessionStore<S>,
    navigator: N,
    gate: RouteGate,
    current: RefCell<Option<StoredSession>>,
}

impl<B, S, N> AuthSession<B, S, N>
where
    B: AuthBackend,
    S: Storage,
    N: Navigator,
{
    /// Build the session and hydrate it from durable storage (read once).
    pub fn new(backend: B, storage: S, navigator: N) -> Self {
        let store = SessionStore::new(storage);
        let current = store.load().unwrap_or_else(|e| {
            tracing::error!("could not read stored session: {e}");
            None
        });
        if let Some(s) = &current {
            tracing::info!(role = %s.identity.role, "restored session");
        }

        Self {
            backend,
            store,
            navigator,
            gate: RouteGate::default(),
            current: RefCell::new(current),
        }
    }

    pub fn with_gate(mut self, gate: RouteGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn current(&self) -> Option<Identity> {
        self.current.borrow().as_ref().map(|s| s.identity.clone())
    }

    pub fn token(&self) -> Option<SessionToken> {
        self.current.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.current.borrow().as_ref().map(|s| s.identity.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        let credentials = Credentials::new(username, password)?;
        let grant = self
            .backend
            .login(&credentials)
            .await
            .inspect_err(|e| tracing::warn!(username = %credentials.username, "login failed: {e}"))?;
        self.establish(grant)
    }

    /// Hand control to the backend's Google OAuth flow.
    ///
    /// The browser leaves the app; the callback route picks up from there.
    pub fn login_with_google(&self) {
        let url = self.backend.google_authorization_url();
        tracing::info!(%url, "redirecting to google sign-in");
        self.navigator.redirect_external(&url);
    }

    pub async fn login_with_google_token(&self, id_token: &str) -> Result<Identity, AuthError> {
        if id_token.trim().is_empty() {
            return Err(AuthError::validation("google token is required"));
        }
        let grant = self
            .backend
            .exchange_google_token(id_token)
            .await
            .inspect_err(|e| tracing::warn!("google token exchange failed: {e}"))?;
        self.establish(grant)
    }

    /// Register and immediately sign in.
    ///
    /// Mismatched confirmation is rejected before the backend is called.
    pub async fn sign_up(
        &self,
        username: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<Identity, AuthError> {
        self.sign_up_with(SignUp::new(username, password, confirmation)?).await
    }

    pub async fn sign_up_with(&self, request: SignUp) -> Result<Identity, AuthError> {
        let grant = self
            .backend
            .sign_up(&request)
            .await
            .inspect_err(|e| tracing::warn!(username = %request.username, "sign-up failed: {e}"))?;
        self.establish(grant)
    }

    /// Forget the session everywhere and go home.
    ///
    /// In-memory state is cleared even when storage fails, so the UI never
    /// keeps showing a user who asked to leave.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.current.borrow_mut().take();
        let cleared = self.store.clear();
        self.navigator.navigate("/");
        match cleared {
            Ok(()) => {
                tracing::info!("logged out");
                Ok(())
            }
            Err(e) => {
                tracing::error!("failed to clear stored session: {e}");
                Err(e.into())
            }
        }
    }

    /// Handle the OAuth redirect query and hydrate from what it stored.
    ///
    /// A failed write has already emptied storage, so memory is emptied too.
    pub fn complete_oauth_callback(&self, query: &str) -> Result<CallbackOutcome, AuthError> {
        let outcome = receive_callback(query, &self.store, &self.navigator).inspect_err(|_| {
            self.current.borrow_mut().take();
        })?;
        if matches!(outcome, CallbackOutcome::SignedIn { .. }) {
            self.reload();
        }
        Ok(outcome)
    }

    /// Re-read durable storage into memory.
    pub fn reload(&self) {
        let loaded = self.store.load().unwrap_or_else(|e| {
            tracing::error!("could not read stored session: {e}");
            None
        });
        *self.current.borrow_mut() = loaded;
    }

    /// Gate decision for `path` given the current role.
    pub fn check_route(&self, path: &str) -> GateDecision {
        self.gate.check(path, self.role())
    }

    /// Navigate to `path`, or to the gate's redirect if the role may not enter.
    pub fn navigate_guarded(&self, path: &str) -> GateDecision {
        let decision = self.check_route(path);
        match decision {
            GateDecision::Allow => self.navigator.navigate(path),
            GateDecision::Redirect(to) => self.navigator.navigate(to),
        }
        decision
    }

    fn establish(&self, grant: AuthGrant) -> Result<Identity, AuthError> {
        // A failed save rolls storage back to empty; memory must follow.
        if let Err(e) = self.store.save(&grant.identity, &grant.token) {
            self.current.borrow_mut().take();
            return Err(e.into());
        }
        let identity = grant.identity.clone();
        tracing::info!(role = %identity.role, "session established");
        *self.current.borrow_mut() = Some(StoredSession {
            identity: grant.identity,
            token: grant.token,
        });
        self.navigator.navigate("/");
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use async_trait::async_trait;

    use super::*;
    use crate::navigator::{HistoryNavigator, Navigation};
    use crate::session_store::keys;
    use crate::storage::{MemoryStorage, StorageError};

    #[derive(Default)]
    struct FakeBackend {
        calls: Cell<usize>,
        reject: bool,
    }

    impl FakeBackend {
        fn grant(username: &str) -> AuthGrant {
            AuthGrant {
                token: SessionToken::new(format!("jwt-{username}")),
                identity: Identity::new(username, format!("{username}@example.com"), Role::Customer)
                    .with_id("u-7".parse().unwrap()),
            }
        }
    }

    #[async_trait(?Send)]
    impl AuthBackend for FakeBackend {
        async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, AuthError> {
            self.calls.set(self.calls.get() + 1);
            if self.reject {
                return Err(AuthError::Rejected);
            }
            Ok(Self::grant(&credentials.username))
        }

        async fn sign_up(&self, request: &SignUp) -> Result<AuthGrant, AuthError> {
            self.calls.set(self.calls.get() + 1);
            Ok(Self::grant(&request.username))
        }

        async fn exchange_google_token(&self, _id_token: &str) -> Result<AuthGrant, AuthError> {
            self.calls.set(self.calls.get() + 1);
            Ok(Self::grant("google"))
        }

        fn google_authorization_url(&self) -> String {
            "http://api.test/oauth2/authorization/google".to_string()
        }
    }

    type TestSession = AuthSession<FakeBackend, MemoryStorage, HistoryNavigator>;

    fn session(backend: FakeBackend) -> (TestSession, MemoryStorage, HistoryNavigator) {
        let storage = MemoryStorage::new();
        let nav = HistoryNavigator::new();
        (AuthSession::new(backend, storage.clone(), nav.clone()), storage, nav)
    }

    #[tokio::test]
    async fn login_persists_identity_under_user_key() {
        let (session, storage, nav) = session(FakeBackend::default());
        let identity = session.login("ann", "pw").await.unwrap();

        let blob = storage.get(keys::USER).unwrap().unwrap();
        let stored: Identity = serde_json::from_str(&blob).unwrap();
        assert_eq!(stored, identity);
        assert_eq!(session.current(), Some(identity));
        assert_eq!(session.token().unwrap().as_str(), "jwt-ann");
        assert_eq!(nav.last(), Some(Navigation::Internal("/".to_string())));
    }

    #[tokio::test]
    async fn rejected_login_changes_nothing() {
        let (session, storage, nav) = session(FakeBackend {
            reject: true,
            ..FakeBackend::default()
        });
        let err = session.login("ann", "bad").await.unwrap_err();
        assert_eq!(err, AuthError::Rejected);
        assert!(storage.is_empty());
        assert!(session.current().is_none());
        assert!(nav.history().is_empty());
        assert_eq!(session.backend().calls.get(), 1);
    }

    #[tokio::test]
    async fn mismatched_sign_up_never_calls_backend() {
        let (session, storage, _) = session(FakeBackend::default());
        let err = session.sign_up("ann", "one", "two").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(session.backend().calls.get(), 0);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn sign_up_establishes_session() {
        let (session, _, _) = session(FakeBackend::default());
        let identity = session.sign_up("bea", "pw", "pw").await.unwrap();
        assert_eq!(identity.display_name, "bea");
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_storage_and_memory() {
        let (session, storage, nav) = session(FakeBackend::default());
        session.login("ann", "pw").await.unwrap();
        session.logout().unwrap();

        assert!(!storage.contains(keys::TOKEN));
        assert!(!storage.contains(keys::USER));
        assert!(session.current().is_none());
        assert_eq!(nav.last(), Some(Navigation::Internal("/".to_string())));
    }

    #[tokio::test]
    async fn google_token_exchange_requires_token() {
        let (session, _, _) = session(FakeBackend::default());
        assert!(session.login_with_google_token(" ").await.is_err());
        assert_eq!(session.backend().calls.get(), 0);
        session.login_with_google_token("id-token").await.unwrap();
        assert_eq!(session.role(), Some(Role::Customer));
    }

    #[test]
    fn google_login_leaves_the_app() {
        let (session, _, nav) = session(FakeBackend::default());
        session.login_with_google();
        assert_eq!(
            nav.last(),
            Some(Navigation::External("http://api.test/oauth2/authorization/google".to_string()))
        );
    }

    #[test]
    fn hydrates_from_existing_storage() {
        let storage = MemoryStorage::new();
        let grant = FakeBackend::grant("cy");
        SessionStore::new(storage.clone()).save(&grant.identity, &grant.token).unwrap();

        let session = AuthSession::new(FakeBackend::default(), storage, HistoryNavigator::new());
        assert_eq!(session.current(), Some(grant.identity));
    }

    #[test]
    fn callback_hydrates_context_and_gates_follow_role() {
        let (session, _, nav) = session(FakeBackend::default());
        assert_eq!(session.navigate_guarded("/staff"), GateDecision::Redirect("/login"));

        session
            .complete_oauth_callback("jwtToken=t&role=STAFF&email=s%40x.y&fullName=Sol")
            .unwrap();
        assert_eq!(session.role(), Some(Role::Staff));
        assert_eq!(session.navigate_guarded("/staff/orders"), GateDecision::Allow);
        assert_eq!(session.navigate_guarded("/manager"), GateDecision::Redirect("/"));
        assert_eq!(nav.last(), Some(Navigation::Internal("/".to_string())));
    }

    /// Refuses writes to the `user` key once `broken` is set.
    #[derive(Clone, Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        broken: std::rc::Rc<Cell<bool>>,
    }

    impl Storage for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.broken.get() && key == keys::USER {
                return Err(StorageError::Write {
                    key: key.to_string(),
                    reason: "quota exceeded".to_string(),
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[tokio::test]
    async fn failed_second_login_drops_previous_user_from_memory() {
        let storage = FlakyStorage::default();
        let session = AuthSession::new(FakeBackend::default(), storage.clone(), HistoryNavigator::new());
        session.login("ann", "pw").await.unwrap();
        assert_eq!(session.current().unwrap().display_name, "ann");

        storage.broken.set(true);
        let err = session.login("bob", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Storage(StorageError::Write { .. })));
        assert!(session.current().is_none());
        assert!(session.token().is_none());
        assert!(storage.inner.is_empty());
    }

    #[tokio::test]
    async fn failed_callback_write_drops_previous_user_from_memory() {
        let storage = FlakyStorage::default();
        let nav = HistoryNavigator::new();
        let session = AuthSession::new(FakeBackend::default(), storage.clone(), nav.clone());
        session.login("ann", "pw").await.unwrap();

        storage.broken.set(true);
        let result =
            session.complete_oauth_callback("jwtToken=t&role=STAFF&email=s%40x.y&fullName=Sol");
        assert!(result.is_err());
        assert!(session.current().is_none());
        assert!(storage.inner.is_empty());
        assert_eq!(
            nav.last(),
            Some(Navigation::Internal(crate::callback::LOGIN_ERROR_ROUTE.to_string()))
        );
    }

    #[test]
    fn failed_callback_keeps_logged_out() {
        let (session, storage, _) = session(FakeBackend::default());
        let outcome = session.complete_oauth_callback("role=STAFF").unwrap();
        assert!(matches!(outcome, CallbackOutcome::Rejected { .. }));
        assert!(session.current().is_none());
        assert!(storage.is_empty());
    }
}
