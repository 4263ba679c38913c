use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: Option<u32>,
    pub quiet: bool,
    pub project: Option<String>,
}

impl GlobalFlags {
    /// Row cap for list output: `--limit`, else the configured default.
    #[must_use]
    pub fn limit_or(&self, configured: u32) -> usize {
        self.limit.unwrap_or(configured) as usize
    }
}
