use std::time::Duration;

use cf_auth::actions::Notice;
use cf_auth::browser_flow;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthOauthArgs;
use crate::context::AppContext;

pub async fn handle(
    args: &AuthOauthArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let backend = ctx.hosted()?;
    ctx.load_session().await?;
    let session = browser_flow::login(
        backend,
        args.provider.into(),
        Duration::from_secs(args.timeout_secs),
    )
    .await?;
    let notice = Notice {
        message: "Signed in successfully!",
        session: Some(session),
    };
    super::report(ctx, flags, notice).await
}
