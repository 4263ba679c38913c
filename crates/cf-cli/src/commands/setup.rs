use cf_auth::SessionStore;
use cf_config::{BackendConfig, CodeflowConfig};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SetupResponse {
    backend_configured: bool,
    url: String,
    anon_key: String,
    profiles_table: String,
    callback_url: Option<String>,
    home_route: String,
    session_source: Option<String>,
    next_step: Option<String>,
}

/// Handle `cflow setup`: report what is configured and what is missing.
pub fn handle(flags: &GlobalFlags, config: &CodeflowConfig) -> anyhow::Result<()> {
    let source = SessionStore::new().detect_source().map(|s| s.to_string());
    output(&report(config, source), flags.format)
}

fn report(config: &CodeflowConfig, session_source: Option<String>) -> SetupResponse {
    let backend = &config.backend;
    let configured = backend.require_configured().is_ok();

    let next_step = if !configured {
        Some(
            "set CODEFLOW_BACKEND__URL and CODEFLOW_BACKEND__ANON_KEY (or [backend] in .codeflow/config.toml)"
                .to_string(),
        )
    } else if session_source.is_none() {
        Some("run `cflow auth login` to sign in".to_string())
    } else {
        None
    };

    SetupResponse {
        backend_configured: configured,
        url: display_or_missing(&backend.url),
        anon_key: mask(&backend.anon_key),
        profiles_table: backend.profiles_table.clone(),
        callback_url: configured.then(|| backend.callback_url()),
        home_route: config.general.home_route.clone(),
        session_source,
        next_step,
    }
}

fn display_or_missing(value: &str) -> String {
    if value.trim().is_empty() {
        "missing".to_string()
    } else {
        value.to_string()
    }
}

/// Show only the last four characters of a key.
fn mask(key: &str) -> String {
    let key = key.trim();
    if key.is_empty() {
        return "missing".to_string();
    }
    let count = key.chars().count();
    if count <= 8 {
        return "*".repeat(count);
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> CodeflowConfig {
        CodeflowConfig {
            backend: BackendConfig {
                url: "https://abcdefgh.example.co".into(),
                anon_key: "eyJhbGciOiJIUzI1NiJ9.anon-key-1234".into(),
                ..BackendConfig::default()
            },
            ..CodeflowConfig::default()
        }
    }

    #[test]
    fn unconfigured_backend_points_at_env_vars() {
        let out = report(&CodeflowConfig::default(), None);
        assert!(!out.backend_configured);
        assert_eq!(out.url, "missing");
        assert_eq!(out.anon_key, "missing");
        assert!(out.callback_url.is_none());
        assert!(out.next_step.is_some_and(|s| s.contains("CODEFLOW_BACKEND__URL")));
    }

    #[test]
    fn configured_without_session_suggests_login() {
        let out = report(&configured(), None);
        assert!(out.backend_configured);
        assert_eq!(out.anon_key, "****1234");
        assert_eq!(
            out.callback_url.as_deref(),
            Some("https://abcdefgh.example.co/auth/callback")
        );
        assert!(out.next_step.is_some_and(|s| s.contains("auth login")));
    }

    #[test]
    fn configured_with_session_is_complete() {
        let out = report(&configured(), Some("file".into()));
        assert!(out.next_step.is_none());
        assert_eq!(out.session_source.as_deref(), Some("file"));
    }

    #[test]
    fn short_keys_are_fully_masked() {
        assert_eq!(mask("abc"), "***");
    }
}
