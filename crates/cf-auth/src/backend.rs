//! Contract between the auth bridge and the hosted auth/database provider.
//!
//! [`AuthBackend`] is everything the session bridge needs: a push channel of
//! session changes, a pull for the current session, a single-row profile
//! lookup, and sign-out. [`SignInBackend`] carries the credential flows used by
//! the login screens; they are kept apart so the bridge can be driven by a
//! backend that never signs anyone in (tests, read-only tools).

use std::fmt;

use async_trait::async_trait;
use cf_core::entities::Profile;
use cf_core::enums::AuthEvent;
use cf_core::identity::Session;
use tokio::sync::broadcast;

use crate::error::AuthError;

/// Capacity of the session-change broadcast channel.
pub const SESSION_CHANNEL_CAPACITY: usize = 16;

/// One notification on the session push channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}

impl SessionChange {
    #[must_use]
    pub const fn new(event: AuthEvent, session: Option<Session>) -> Self {
        Self { event, session }
    }

    #[must_use]
    pub const fn signed_out() -> Self {
        Self::new(AuthEvent::SignedOut, None)
    }
}

#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Register for session-change notifications.
    ///
    /// Every receiver sees every change sent after it subscribed. Dropping the
    /// receiver unregisters it.
    fn subscribe(&self) -> broadcast::Receiver<SessionChange>;

    /// Pull the current session, if any.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Fetch the profile row whose primary key is `user_id`.
    ///
    /// Zero or multiple matching rows are errors.
    async fn fetch_profile(&self, user_id: &str) -> Result<Profile, AuthError>;

    /// Invalidate the session. Must publish [`AuthEvent::SignedOut`] on the
    /// push channel.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Where a one-time code is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpChannel {
    Phone(String),
    /// Email OTP doubles as a magic link.
    Email(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRequest {
    pub channel: OtpChannel,
    /// Stored as `full_name` user metadata when the code creates the user.
    pub full_name: Option<String>,
    /// Where the emailed link sends the user back to.
    pub redirect_to: Option<String>,
}

/// Third-party identity providers offered on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OAuthProvider {
    Google,
    Github,
    Discord,
}

impl OAuthProvider {
    pub const ALL: [Self; 3] = [Self::Google, Self::Github, Self::Discord];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Github => "github",
            Self::Discord => "discord",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credential flows. Successful sign-ins publish [`AuthEvent::SignedIn`] on the
/// [`AuthBackend`] push channel of the same client.
#[async_trait]
pub trait SignInBackend: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str)
    -> Result<Session, AuthError>;

    /// Returns `None` when the provider requires email confirmation first.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Option<Session>, AuthError>;

    async fn send_otp(&self, request: &OtpRequest) -> Result<(), AuthError>;

    async fn verify_phone_otp(&self, phone: &str, code: &str) -> Result<Session, AuthError>;

    /// URL that starts a PKCE OAuth flow with `provider`.
    fn authorize_url(&self, provider: OAuthProvider, redirect_to: &str, code_challenge: &str)
    -> String;

    /// Trade the code from an OAuth redirect for a session.
    async fn exchange_code(&self, auth_code: &str, code_verifier: &str)
    -> Result<Session, AuthError>;
}
