use cf_auth::actions::{self, AuthMode};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::{AuthLoginArgs, AuthSignupArgs};
use crate::context::AppContext;

pub async fn handle_login(
    args: &AuthLoginArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let backend = ctx.hosted()?;
    ctx.load_session().await?;
    let notice = actions::email_auth(
        backend,
        AuthMode::SignIn,
        args.email.as_deref().unwrap_or_default(),
        args.password.as_deref().unwrap_or_default(),
        None,
    )
    .await?;
    super::report(ctx, flags, notice).await
}

pub async fn handle_signup(
    args: &AuthSignupArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let backend = ctx.hosted()?;
    ctx.load_session().await?;
    let notice = actions::email_auth(
        backend,
        AuthMode::SignUp,
        args.email.as_deref().unwrap_or_default(),
        args.password.as_deref().unwrap_or_default(),
        args.full_name.as_deref(),
    )
    .await?;
    super::report(ctx, flags, notice).await
}
