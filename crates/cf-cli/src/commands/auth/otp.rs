use cf_auth::actions::{self, AuthMode};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::{AuthMagicLinkArgs, AuthOtpArgs, AuthVerifyArgs};
use crate::context::AppContext;

pub async fn handle_send(
    args: &AuthOtpArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let backend = ctx.hosted()?;
    let mode = if args.signup {
        AuthMode::SignUp
    } else {
        AuthMode::SignIn
    };
    let notice = actions::send_phone_otp(
        backend,
        mode,
        args.phone.as_deref().unwrap_or_default(),
        args.full_name.as_deref(),
    )
    .await?;
    super::report(ctx, flags, notice).await
}

pub async fn handle_verify(
    args: &AuthVerifyArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let backend = ctx.hosted()?;
    ctx.load_session().await?;
    let notice = actions::verify_phone_otp(
        backend,
        args.phone.as_deref().unwrap_or_default(),
        args.code.as_deref().unwrap_or_default(),
    )
    .await?;
    super::report(ctx, flags, notice).await
}

pub async fn handle_magic_link(
    args: &AuthMagicLinkArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let backend = ctx.hosted()?;
    let redirect_to = args
        .redirect_to
        .clone()
        .unwrap_or_else(|| backend.config().callback_url());
    let notice = actions::send_magic_link(
        backend,
        args.email.as_deref().unwrap_or_default(),
        &redirect_to,
    )
    .await?;
    super::report(ctx, flags, notice).await
}
