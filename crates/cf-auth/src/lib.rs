//! # cf-auth
//!
//! Authentication for CodeFlow.
//!
//! Provides the application-wide [`AuthBridge`] (session, user and profile
//! state fed by backend push notifications), the backend contract traits, a
//! `reqwest` client for the hosted auth and row APIs, session persistence
//! (`keyring` with env and file fallbacks), sign-in form actions, and the
//! browser OAuth flow (`tiny_http` + `open`).

pub mod actions;
pub mod backend;
pub mod bridge;
pub mod browser_flow;
pub mod error;
pub mod hosted;
pub mod session_store;
pub mod token;

pub use backend::{AuthBackend, OAuthProvider, SessionChange, SignInBackend};
pub use bridge::{AuthBridge, AuthState, LogNavigator, Navigator};
pub use error::AuthError;
pub use hosted::HostedBackend;
pub use session_store::SessionStore;
