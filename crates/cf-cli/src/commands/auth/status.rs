use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    enabled: bool,
    authenticated: bool,
    user_id: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    display_name: Option<String>,
    role: Option<String>,
    expires_at: Option<String>,
    session_source: Option<String>,
    note: Option<String>,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut state = ctx.load_session().await?;
    if state.is_authenticated() && state.profile.is_none() {
        state = ctx
            .wait_for_state(|s| s.profile.is_some() || s.user.is_none())
            .await?;
    }

    let note = if !ctx.bridge.is_enabled() {
        Some("backend not configured; auth is disabled".to_string())
    } else if !state.is_authenticated() {
        Some("no stored session".to_string())
    } else if state.profile.is_none() {
        Some("profile not available".to_string())
    } else {
        None
    };

    let session_source = ctx
        .hosted()
        .ok()
        .and_then(|backend| backend.store().detect_source())
        .filter(|_| state.is_authenticated())
        .map(|source| source.to_string());

    let profile = state.profile.as_ref();
    let status = AuthStatusResponse {
        enabled: ctx.bridge.is_enabled(),
        authenticated: state.is_authenticated(),
        user_id: state.user.as_ref().map(|u| u.id.clone()),
        email: state.user.as_ref().and_then(|u| u.email.clone()),
        phone: state.user.as_ref().and_then(|u| u.phone.clone()),
        display_name: profile.map(|p| p.display_name().to_string()),
        role: profile.map(|p| p.role.to_string()),
        expires_at: state.session.as_ref().map(|s| s.expires_at.to_rfc3339()),
        session_source,
        note,
    };

    output(&status, flags.format)
}
