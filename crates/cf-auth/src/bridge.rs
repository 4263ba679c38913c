//! Application-wide auth session state.
//!
//! [`AuthBridge`] is constructed once at startup and handed to every component
//! that needs to know who is logged in. It owns one reactive store
//! (`tokio::sync::watch`) holding `{user, profile, session, loading}`.
//!
//! Two trigger sources feed the same reducer, [`Inner::apply_session_change`]:
//! the backend push channel (a listener task registered in [`AuthBridge::start`])
//! and one initial pull of the current session. There is no other code path
//! that writes the session.
//!
//! Profile fetches run as detached tasks. Each carries the generation number
//! current when it was spawned; session changes and stored refreshes bump the
//! generation, so a fetch that completes after a newer change is discarded
//! instead of overwriting fresher state. A failed refresh bumps nothing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use cf_config::{BackendConfig, GeneralConfig};
use cf_core::entities::Profile;
use cf_core::enums::AuthEvent;
use cf_core::identity::{AuthUser, Session};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::backend::{AuthBackend, SessionChange};
use crate::error::AuthError;

/// Snapshot of the shared auth state.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub profile: Option<Profile>,
    pub session: Option<Session>,
    /// True until the first session resolution.
    pub loading: bool,
}

impl AuthState {
    const fn initial() -> Self {
        Self {
            user: None,
            profile: None,
            session: None,
            loading: true,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Receives route changes requested by the bridge (redirect on sign-out).
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Navigator for headless contexts: records the redirect in the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: &str) {
        tracing::info!(route, "redirect requested");
    }
}

/// Shared handle to the auth session bridge. Cheap to clone.
#[derive(Clone)]
pub struct AuthBridge {
    inner: Arc<Inner>,
}

struct Inner {
    /// `None` in disabled-auth mode.
    backend: Option<Arc<dyn AuthBackend>>,
    navigator: Arc<dyn Navigator>,
    home_route: String,
    state: watch::Sender<AuthState>,
    started: AtomicBool,
    generation: AtomicU64,
    listener: OnceLock<JoinHandle<()>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(handle) = self.listener.get() {
            handle.abort();
        }
    }
}

impl AuthBridge {
    /// Bridge over a live backend. Call [`start`](Self::start) before use.
    pub fn new(
        backend: Arc<dyn AuthBackend>,
        navigator: Arc<dyn Navigator>,
        home_route: impl Into<String>,
    ) -> Self {
        Self::build(Some(backend), navigator, home_route.into())
    }

    /// Bridge with auth turned off: never loading, never authenticated.
    pub fn disabled(navigator: Arc<dyn Navigator>, home_route: impl Into<String>) -> Self {
        Self::build(None, navigator, home_route.into())
    }

    /// Build from configuration.
    ///
    /// Missing or placeholder credentials yield a [`disabled`](Self::disabled)
    /// bridge and `connect` is never called, so no network access happens.
    ///
    /// # Errors
    ///
    /// Propagates errors from `connect`.
    pub fn from_config<F>(
        backend_config: &BackendConfig,
        general: &GeneralConfig,
        navigator: Arc<dyn Navigator>,
        connect: F,
    ) -> Result<Self, AuthError>
    where
        F: FnOnce(&BackendConfig) -> Result<Arc<dyn AuthBackend>, AuthError>,
    {
        if !backend_config.is_configured() {
            tracing::warn!(
                "backend credentials are missing or placeholders; running with auth disabled"
            );
            return Ok(Self::disabled(navigator, general.home_route.clone()));
        }
        let backend = connect(backend_config)?;
        Ok(Self::new(backend, navigator, general.home_route.clone()))
    }

    fn build(
        backend: Option<Arc<dyn AuthBackend>>,
        navigator: Arc<dyn Navigator>,
        home_route: String,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::initial());
        Self {
            inner: Arc::new(Inner {
                backend,
                navigator,
                home_route,
                state,
                started: AtomicBool::new(false),
                generation: AtomicU64::new(0),
                listener: OnceLock::new(),
            }),
        }
    }

    /// Whether a backend is attached.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.backend.is_some()
    }

    /// Subscribe to session changes, then pull the current session once.
    ///
    /// Idempotent: later calls return immediately.
    pub async fn start(&self) {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            return;
        }

        let Some(backend) = self.inner.backend.clone() else {
            self.inner.state.send_modify(|state| state.loading = false);
            return;
        };

        let receiver = backend.subscribe();
        let handle = tokio::spawn(listen(Arc::downgrade(&self.inner), receiver));
        // `started` guards this; the slot is always empty here.
        let _ = self.inner.listener.set(handle);

        match backend.current_session().await {
            Ok(session) => self
                .inner
                .apply_session_change(SessionChange::new(AuthEvent::InitialSession, session)),
            Err(error) => {
                tracing::warn!(%error, "failed to load the current session");
                self.inner.state.send_modify(|state| state.loading = false);
            }
        }
    }

    /// Unregister the session subscription. State stays readable.
    pub fn shutdown(&self) {
        if let Some(handle) = self.inner.listener.get() {
            handle.abort();
        }
    }

    /// Current snapshot.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotInitialized` if [`start`](Self::start) was never called.
    pub fn state(&self) -> Result<AuthState, AuthError> {
        self.ensure_started()?;
        Ok(self.inner.state.borrow().clone())
    }

    /// Reactive view of the state.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotInitialized` if [`start`](Self::start) was never called.
    pub fn subscribe(&self) -> Result<watch::Receiver<AuthState>, AuthError> {
        self.ensure_started()?;
        Ok(self.inner.state.subscribe())
    }

    /// Wait until the first session resolution has happened.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotInitialized` if [`start`](Self::start) was never called.
    pub async fn loaded(&self) -> Result<AuthState, AuthError> {
        let mut receiver = self.subscribe()?;
        let state = receiver
            .wait_for(|state| !state.loading)
            .await
            .map_err(|_| AuthError::Other("auth state store closed".into()))?
            .clone();
        Ok(state)
    }

    /// Re-fetch the profile of the current user.
    ///
    /// A stored result supersedes any profile fetch still in flight. Fetch
    /// failures are logged and leave the state, and pending fetches, untouched.
    /// Returns whether a profile was stored.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotInitialized` if [`start`](Self::start) was never called.
    pub async fn refresh_profile(&self) -> Result<bool, AuthError> {
        self.ensure_started()?;
        let Some(backend) = self.inner.backend.clone() else {
            return Ok(false);
        };
        let current_user = self.inner.state.borrow().user.as_ref().map(|u| u.id.clone());
        let Some(user_id) = current_user else {
            return Ok(false);
        };
        let generation = self.inner.generation.load(Ordering::SeqCst);
        let result = backend.fetch_profile(&user_id).await;
        Ok(self
            .inner
            .apply_profile_result(&user_id, generation, result, true))
    }

    /// Sign out through the backend and wait for it to finish.
    ///
    /// State is cleared by the resulting `SignedOut` notification, which also
    /// redirects to the home route. A no-op when auth is disabled.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotInitialized` if [`start`](Self::start) was never
    /// called, or the backend's sign-out error.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.ensure_started()?;
        let Some(backend) = self.inner.backend.clone() else {
            return Ok(());
        };
        backend.sign_out().await
    }

    fn ensure_started(&self) -> Result<(), AuthError> {
        if self.inner.started.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AuthError::NotInitialized)
        }
    }
}

impl std::fmt::Debug for AuthBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthBridge")
            .field("enabled", &self.is_enabled())
            .field("home_route", &self.inner.home_route)
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

async fn listen(inner: Weak<Inner>, mut receiver: broadcast::Receiver<SessionChange>) {
    loop {
        match receiver.recv().await {
            Ok(change) => {
                let Some(inner) = inner.upgrade() else {
                    break;
                };
                inner.apply_session_change(change);
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "auth listener lagged; skipped session changes");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    tracing::debug!("auth listener stopped");
}

impl Inner {
    fn apply_session_change(self: &Arc<Self>, change: SessionChange) {
        let SessionChange { event, session } = change;
        let user = session.as_ref().map(|s| s.user.clone());
        let fetch_for = user.as_ref().map(|u| u.id.clone());
        let mut generation = 0;

        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let same_user = state.user.as_ref().map(|u| &u.id) == user.as_ref().map(|u| &u.id);
            if user.is_none() || !same_user {
                state.profile = None;
            }
            state.session = session;
            state.user = user;
            state.loading = false;
        });

        tracing::debug!(%event, user_id = fetch_for.as_deref(), generation, "session changed");

        if let Some(user_id) = fetch_for {
            self.spawn_profile_fetch(user_id, generation);
        }

        if event == AuthEvent::SignedOut {
            self.navigator.navigate(&self.home_route);
        }
    }

    fn spawn_profile_fetch(self: &Arc<Self>, user_id: String, generation: u64) {
        let Some(backend) = self.backend.clone() else {
            return;
        };
        let inner = Arc::downgrade(self);
        tokio::spawn(async move {
            let result = backend.fetch_profile(&user_id).await;
            if let Some(inner) = inner.upgrade() {
                inner.apply_profile_result(&user_id, generation, result, false);
            }
        });
    }

    /// Store a fetched profile if it still belongs to the current state.
    ///
    /// With `supersede`, a stored profile also bumps the generation so older
    /// fetches still in flight are dropped when they land.
    fn apply_profile_result(
        &self,
        user_id: &str,
        generation: u64,
        result: Result<Profile, AuthError>,
        supersede: bool,
    ) -> bool {
        let profile = match result {
            Ok(profile) => profile,
            Err(error) => {
                tracing::warn!(%error, user_id, "error fetching profile");
                return false;
            }
        };

        let stored = self.state.send_if_modified(|state| {
            let current = self.generation.load(Ordering::SeqCst) == generation;
            let same_user = state.user.as_ref().is_some_and(|u| u.id == user_id);
            if current && same_user {
                state.profile = Some(profile);
                if supersede {
                    self.generation.fetch_add(1, Ordering::SeqCst);
                }
                true
            } else {
                false
            }
        });

        if !stored {
            tracing::debug!(user_id, generation, "discarded stale profile fetch");
        }
        stored
    }
}
