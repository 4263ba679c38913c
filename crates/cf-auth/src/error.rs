use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("auth is disabled; set CODEFLOW_BACKEND__URL and CODEFLOW_BACKEND__ANON_KEY")]
    NotConfigured,

    #[error("auth state read before the auth bridge was started")]
    NotInitialized,

    #[error("not authenticated; run `cflow auth login`")]
    NotAuthenticated,

    /// A required form field was left empty. Carries the user-facing message.
    #[error("{0}")]
    MissingFields(String),

    #[error("backend request failed: {0}")]
    Request(String),

    #[error("backend rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("no profile row for user {0}")]
    ProfileNotFound(String),

    #[error("browser login failed: {0}")]
    BrowserFlowFailed(String),

    #[error("session store error: {0}")]
    SessionStoreError(String),

    #[error("{0}")]
    Other(String),
}

impl AuthError {
    /// True when the backend answered with a client error (bad credentials,
    /// revoked refresh token, ...) rather than failing to answer at all.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 400 && *status < 500)
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error.to_string())
    }
}
