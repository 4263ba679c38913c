mod login;
mod logout;
mod oauth;
mod otp;
mod status;

use cf_auth::actions::Notice;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cflow auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Status => status::handle(ctx, flags).await,
        AuthCommands::Login(args) => login::handle_login(args, ctx, flags).await,
        AuthCommands::Signup(args) => login::handle_signup(args, ctx, flags).await,
        AuthCommands::Otp(args) => otp::handle_send(args, ctx, flags).await,
        AuthCommands::Verify(args) => otp::handle_verify(args, ctx, flags).await,
        AuthCommands::MagicLink(args) => otp::handle_magic_link(args, ctx, flags).await,
        AuthCommands::Oauth(args) => oauth::handle(args, ctx, flags).await,
        AuthCommands::Logout => logout::handle(ctx, flags).await,
    }
}

#[derive(Debug, Serialize)]
struct SignInResponse {
    message: &'static str,
    authenticated: bool,
    user_id: Option<String>,
    email: Option<String>,
    expires_at: Option<String>,
    /// Whether the shared auth state picked up the new session.
    session_synced: bool,
}

/// Print the outcome of a form action.
///
/// When the action signed the user in, waits for the pushed `SignedIn`
/// change to reach the bridge before reporting.
async fn report(ctx: &AppContext, flags: &GlobalFlags, notice: Notice) -> anyhow::Result<()> {
    let Some(session) = notice.session else {
        return output(
            &SignInResponse {
                message: notice.message,
                authenticated: false,
                user_id: None,
                email: None,
                expires_at: None,
                session_synced: false,
            },
            flags.format,
        );
    };

    let user_id = session.user.id.clone();
    let state = ctx
        .wait_for_state(|state| state.user.as_ref().is_some_and(|u| u.id == user_id))
        .await?;
    let session_synced = state.user.is_some_and(|u| u.id == user_id);

    output(
        &SignInResponse {
            message: notice.message,
            authenticated: true,
            user_id: Some(session.user.id),
            email: session.user.email,
            expires_at: Some(session.expires_at.to_rfc3339()),
            session_synced,
        },
        flags.format,
    )
}
