//! `skincart-auth`: client-side session and role routing.
//!
//! This crate is intentionally decoupled from HTTP and from the browser:
//! durable storage, navigation and the backend are all traits, so the same
//! session logic runs in the wasm frontend and in native tests.

pub mod backend;
pub mod callback;
pub mod context;
pub mod error;
pub mod gate;
pub mod navigator;
pub mod session_store;
pub mod storage;

pub use backend::{AuthBackend, AuthGrant, Credentials, SignUp};
pub use callback::{CallbackOutcome, CallbackParams, receive_callback};
pub use context::AuthSession;
pub use error::AuthError;
pub use gate::{Access, GateDecision, RouteGate, RouteRule};
pub use navigator::{HistoryNavigator, Navigation, Navigator};
pub use session_store::{SessionStore, StoredSession, keys};
pub use storage::{MemoryStorage, Storage, StorageError};
