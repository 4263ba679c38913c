use clap::Subcommand;

/// Profile of the signed-in user.
#[derive(Clone, Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show the profile loaded for the current session.
    Show,
    /// Re-fetch the profile from the backend.
    Refresh,
}
