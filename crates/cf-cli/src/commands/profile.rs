use cf_core::entities::Profile;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProfileCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ProfileResponse {
    display_name: String,
    initials: String,
    #[serde(flatten)]
    profile: Profile,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            display_name: profile.display_name().to_string(),
            initials: profile.initials(),
            profile,
        }
    }
}

/// Handle `cflow profile <subcommand>`.
pub async fn handle(
    action: &ProfileCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let state = ctx.load_session().await?;
    if !ctx.bridge.is_enabled() {
        anyhow::bail!("profile: backend is not configured (see `cflow setup`)");
    }
    if !state.is_authenticated() {
        anyhow::bail!("profile: not signed in (run `cflow auth login`)");
    }

    let profile = match action {
        ProfileCommands::Show => {
            ctx.wait_for_state(|s| s.profile.is_some() || s.user.is_none())
                .await?
                .profile
        }
        ProfileCommands::Refresh => {
            ctx.bridge.refresh_profile().await?;
            ctx.bridge.state()?.profile
        }
    };

    let Some(profile) = profile else {
        anyhow::bail!("profile: no profile row found for the signed-in user");
    };
    output(&ProfileResponse::from(profile), flags.format)
}
