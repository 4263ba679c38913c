//! HTTP client for the hosted auth and row APIs.
//!
//! Talks to `{url}/auth/v1` for sessions and `{url}/rest/v1` for the profile
//! table. Every request carries the project's anon key as `apikey`; row reads
//! are authorized with the signed-in user's access token when there is one.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cf_config::BackendConfig;
use cf_core::entities::Profile;
use cf_core::enums::AuthEvent;
use cf_core::identity::Session;
use serde::Serialize;
use serde_json::json;
use tokio::sync::broadcast;

use crate::backend::{
    AuthBackend, OAuthProvider, OtpChannel, OtpRequest, SESSION_CHANNEL_CAPACITY, SessionChange,
    SignInBackend,
};
use crate::error::AuthError;
use crate::session_store::SessionStore;
use crate::token::TokenResponse;

/// Refresh sessions that expire within this many seconds.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// Accept header asking the row API for exactly one object.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

pub struct HostedBackend {
    http: reqwest::Client,
    config: BackendConfig,
    store: SessionStore,
    events: broadcast::Sender<SessionChange>,
}

impl HostedBackend {
    /// Build a client for a configured backend.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotConfigured` for missing or placeholder
    /// credentials, or `AuthError::Request` if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig, store: SessionStore) -> Result<Self, AuthError> {
        config
            .require_configured()
            .map_err(|_| AuthError::NotConfigured)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let (events, _) = broadcast::channel(SESSION_CHANNEL_CAPACITY);
        Ok(Self {
            http,
            config: config.clone(),
            store,
            events,
        })
    }

    /// [`new`](Self::new) with the default session store, shared.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn connect(config: &BackendConfig) -> Result<Arc<Self>, AuthError> {
        Self::new(config, SessionStore::new()).map(Arc::new)
    }

    #[must_use]
    pub const fn config(&self) -> &BackendConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    fn request(
        &self,
        method: reqwest::Method,
        url: &str,
        bearer: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let token = bearer.unwrap_or(&self.config.anon_key);
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
    }

    fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.auth_url())
    }

    async fn post_auth<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, AuthError> {
        let url = self.auth_endpoint(path);
        let resp = self
            .request(reqwest::Method::POST, &url, bearer)
            .json(body)
            .send()
            .await?;
        check_response(resp).await
    }

    async fn token_grant<B: Serialize + Sync>(
        &self,
        grant_type: &str,
        body: &B,
    ) -> Result<Session, AuthError> {
        let resp = self
            .post_auth(&format!("token?grant_type={grant_type}"), body, None)
            .await?;
        let token: TokenResponse = resp.json().await?;
        token.into_session()
    }

    async fn refresh(&self, session: &Session) -> Result<Session, AuthError> {
        let refresh_token = session.refresh_token.as_deref().unwrap_or_default();
        self.token_grant("refresh_token", &json!({ "refresh_token": refresh_token }))
            .await
    }

    /// Persist `session` and publish it on the push channel.
    fn establish(&self, session: Session, event: AuthEvent) -> Result<Session, AuthError> {
        self.store.save(&session)?;
        self.emit(SessionChange::new(event, Some(session.clone())));
        Ok(session)
    }

    fn emit(&self, change: SessionChange) {
        // No receivers is fine: nobody is listening yet.
        let _ = self.events.send(change);
    }
}

#[async_trait]
impl AuthBackend for HostedBackend {
    fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.events.subscribe()
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.store.load() else {
            return Ok(None);
        };

        if !session.is_near_expiry(EXPIRY_BUFFER_SECS) {
            return Ok(Some(session));
        }

        if !session.can_refresh() {
            if session.is_near_expiry(0) {
                tracing::debug!(user_id = %session.user.id, "dropping expired session");
                self.store.delete()?;
                return Ok(None);
            }
            return Ok(Some(session));
        }

        match self.refresh(&session).await {
            Ok(refreshed) => self
                .establish(refreshed, AuthEvent::TokenRefreshed)
                .map(Some),
            Err(error) if error.is_rejection() => {
                tracing::warn!(%error, "stored session was rejected; signing out locally");
                self.store.delete()?;
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Profile, AuthError> {
        let url = format!(
            "{}/{}?id=eq.{}&select=*",
            self.config.rest_url(),
            self.config.profiles_table,
            urlencoding::encode(user_id)
        );
        let session = self.store.load();
        let bearer = session.as_ref().map(|s| s.access_token.as_str());
        let resp = self
            .request(reqwest::Method::GET, &url, bearer)
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_ACCEPTABLE {
            return Err(AuthError::ProfileNotFound(user_id.to_string()));
        }
        let resp = check_response(resp).await?;
        Ok(resp.json().await?)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(session) = self.store.load()
            && let Err(error) = self
                .post_auth("logout", &json!({}), Some(&session.access_token))
                .await
        {
            tracing::warn!(%error, "remote logout failed; clearing local session anyway");
        }
        let deleted = self.store.delete();
        self.emit(SessionChange::signed_out());
        deleted
    }
}

#[async_trait]
impl SignInBackend for HostedBackend {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let session = self
            .token_grant(
                "password",
                &json!({ "email": email, "password": password }),
            )
            .await?;
        self.establish(session, AuthEvent::SignedIn)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Option<Session>, AuthError> {
        let body = json!({
            "email": email,
            "password": password,
            "data": { "full_name": full_name },
        });
        let resp = self.post_auth("signup", &body, None).await?;
        let value: serde_json::Value = resp.json().await?;

        // Without auto-confirm the provider answers with the bare user.
        if value.get("access_token").is_none() {
            return Ok(None);
        }
        let token: TokenResponse = serde_json::from_value(value)
            .map_err(|e| AuthError::Other(format!("unexpected signup response: {e}")))?;
        let session = token.into_session()?;
        self.establish(session, AuthEvent::SignedIn).map(Some)
    }

    async fn send_otp(&self, request: &OtpRequest) -> Result<(), AuthError> {
        let mut body = match &request.channel {
            OtpChannel::Phone(phone) => json!({ "phone": phone, "channel": "sms" }),
            OtpChannel::Email(email) => json!({ "email": email }),
        };
        body["create_user"] = json!(true);
        if let Some(full_name) = &request.full_name {
            body["data"] = json!({ "full_name": full_name });
        }

        let path = match &request.redirect_to {
            Some(redirect) => format!("otp?redirect_to={}", urlencoding::encode(redirect)),
            None => "otp".to_string(),
        };
        self.post_auth(&path, &body, None).await?;
        Ok(())
    }

    async fn verify_phone_otp(&self, phone: &str, code: &str) -> Result<Session, AuthError> {
        let body = json!({ "type": "sms", "phone": phone, "token": code });
        let resp = self.post_auth("verify", &body, None).await?;
        let token: TokenResponse = resp.json().await?;
        let session = token.into_session()?;
        self.establish(session, AuthEvent::SignedIn)
    }

    fn authorize_url(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
        code_challenge: &str,
    ) -> String {
        format!(
            "{}?provider={provider}&redirect_to={}&code_challenge={}&code_challenge_method=s256",
            self.auth_endpoint("authorize"),
            urlencoding::encode(redirect_to),
            urlencoding::encode(code_challenge),
        )
    }

    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> Result<Session, AuthError> {
        let session = self
            .token_grant(
                "pkce",
                &json!({ "auth_code": auth_code, "code_verifier": code_verifier }),
            )
            .await?;
        self.establish(session, AuthEvent::SignedIn)
    }
}

impl std::fmt::Debug for HostedBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostedBackend")
            .field("url", &self.config.base_url())
            .field("profiles_table", &self.config.profiles_table)
            .finish_non_exhaustive()
    }
}

/// Map non-success responses to [`AuthError::Api`].
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(AuthError::Api {
        status,
        message: error_message(&body),
    })
}

/// Pull a human-readable message out of an error body.
///
/// The auth API uses `error_description` or `msg`; the row API uses `message`.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error_description", "msg", "message", "error"] {
            if let Some(message) = value.get(key).and_then(serde_json::Value::as_str)
                && !message.is_empty()
            {
                return message.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no response body".to_string()
    } else {
        trimmed.to_string()
    }
}
