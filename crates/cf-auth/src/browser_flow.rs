use std::time::{Duration, Instant};

use base64::Engine as _;
use cf_core::identity::Session;
use sha2::{Digest, Sha256};

use crate::backend::{OAuthProvider, SignInBackend};
use crate::error::AuthError;

/// Query parameters of the loopback callback.
#[derive(Debug, Default, PartialEq, Eq)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Run the browser-based OAuth sign-in with PKCE.
///
/// 1. Start `tiny_http` on `127.0.0.1:0` (random port)
/// 2. Open the browser at the provider's authorize URL, redirecting to localhost
/// 3. Wait for the callback with the auth code (in `spawn_blocking`, `recv` blocks)
/// 4. Exchange the code and verifier for a session
///
/// # Errors
///
/// Returns `AuthError::BrowserFlowFailed` if the server cannot bind, the
/// callback times out or fails the state check, or the exchange error.
pub async fn login(
    backend: &dyn SignInBackend,
    provider: OAuthProvider,
    timeout: Duration,
) -> Result<Session, AuthError> {
    let server = tiny_http::Server::http("127.0.0.1:0")
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to bind: {e}")))?;
    let port = server
        .server_addr()
        .to_ip()
        .map(|a| a.port())
        .ok_or_else(|| AuthError::BrowserFlowFailed("no port".into()))?;

    let state = hex(&random_bytes::<16>()?);
    let verifier = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(random_bytes::<32>()?);
    let challenge = code_challenge(&verifier);

    let redirect_url = format!("http://127.0.0.1:{port}/callback?state={state}");
    let authorize_url = backend.authorize_url(provider, &redirect_url, &challenge);

    eprintln!("Opening browser to: {authorize_url}");
    if let Err(error) = open::that(&authorize_url) {
        eprintln!("Failed to open browser: {error}");
        eprintln!("Open the URL above manually, then return here.");
    }

    let code = tokio::task::spawn_blocking(move || wait_for_callback(&server, timeout, &state))
        .await
        .map_err(|e| AuthError::BrowserFlowFailed(format!("spawn_blocking join: {e}")))??;

    tracing::debug!(%provider, "received auth code; exchanging");
    backend.exchange_code(&code, &verifier).await
}

/// S256 PKCE challenge: base64url(sha256(verifier)).
#[must_use]
pub fn code_challenge(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest)
}

fn random_bytes<const N: usize>() -> Result<[u8; N], AuthError> {
    let mut bytes = [0u8; N];
    getrandom::fill(&mut bytes)
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to generate nonce: {e}")))?;
    Ok(bytes)
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Block until the callback server receives the auth code.
///
/// Requests that aren't the callback (favicon, preflight) are answered with
/// 204 and ignored.
fn wait_for_callback(
    server: &tiny_http::Server,
    timeout: Duration,
    expected_state: &str,
) -> Result<String, AuthError> {
    let deadline = Instant::now() + timeout;
    let timed_out = || {
        AuthError::BrowserFlowFailed(format!(
            "browser callback timed out after {}s",
            timeout.as_secs()
        ))
    };

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(timed_out());
        }

        let request = match server.recv_timeout(remaining) {
            Ok(Some(req)) => req,
            Ok(None) => return Err(timed_out()),
            Err(e) => return Err(AuthError::BrowserFlowFailed(format!("recv error: {e}"))),
        };

        let url = request.url().to_string();
        let Some(query) = url.strip_prefix("/callback?") else {
            let _ = request.respond(tiny_http::Response::from_string("").with_status_code(204));
            continue;
        };

        let params = parse_callback(query)?;

        if let Some(error) = params.error {
            let _ = request.respond(html("Auth failed", "The provider reported an error. Check CLI output."));
            return Err(AuthError::BrowserFlowFailed(error));
        }

        let Some(code) = params.code else {
            let _ = request.respond(html("Waiting for authentication…", "Redirecting, please wait."));
            continue;
        };

        if params.state.as_deref() != Some(expected_state) {
            let _ = request.respond(html("Auth failed", "State mismatch. Check CLI output."));
            return Err(AuthError::BrowserFlowFailed(
                "state mismatch, possible CSRF".into(),
            ));
        }

        let _ = request.respond(html("Authenticated!", "You can close this tab."));
        return Ok(code);
    }
}

fn parse_callback(query: &str) -> Result<CallbackParams, AuthError> {
    let mut params = CallbackParams::default();
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = urlencoding::decode(&value.replace('+', " "))
            .map_err(|e| AuthError::BrowserFlowFailed(format!("URL decode: {e}")))?
            .into_owned();
        match key {
            "code" => params.code = Some(value),
            "state" => params.state = Some(value),
            "error_description" => params.error = Some(value),
            "error" if params.error.is_none() => params.error = Some(value),
            _ => {}
        }
    }
    Ok(params)
}

fn html(title: &str, body: &str) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let response = tiny_http::Response::from_string(format!(
        "<html><body><h1>{title}</h1><p>{body}</p></body></html>"
    ));
    match tiny_http::Header::from_bytes("Content-Type", "text/html") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
