use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    signed_out: bool,
    was_signed_in: bool,
    redirect: String,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let before = ctx.load_session().await?;
    ctx.bridge.sign_out().await?;
    let after = ctx.wait_for_state(|state| state.user.is_none()).await?;

    output(
        &AuthLogoutResponse {
            signed_out: after.user.is_none(),
            was_signed_in: before.is_authenticated(),
            redirect: ctx.config.general.home_route.clone(),
        },
        flags.format,
    )
}
