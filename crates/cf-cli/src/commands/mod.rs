pub mod auth;
pub mod profile;
pub mod schema;
pub mod search;
pub mod setup;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Dispatch a backend-bound command to its handler module.
pub async fn dispatch(
    command: &Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => auth::handle(action, ctx, flags).await,
        Commands::Profile { action } => profile::handle(action, ctx, flags).await,
        Commands::Search(_) | Commands::Schema(_) | Commands::Setup => {
            anyhow::bail!("search/schema/setup are handled before the backend is connected")
        }
    }
}
