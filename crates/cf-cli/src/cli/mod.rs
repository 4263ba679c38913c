use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `cflow` binary.
#[derive(Debug, Parser)]
#[command(name = "cflow", version, about = "CodeFlow - code marketplace from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root path (reads its .env and .codeflow/config.toml)
    #[arg(short, long, global = true)]
    pub project: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            project: self.project.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use cf_core::enums::{Difficulty, SortField, SortOrder};
    use cf_search::PriceRange;
    use clap::{CommandFactory, Parser};

    use super::root_commands::SchemaType;
    use super::subcommands::{AuthCommands, ProfileCommands, auth::ProviderArg};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "cflow", "--format", "table", "--limit", "10", "--verbose", "setup",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Setup));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["cflow", "profile", "show", "--format", "raw", "-q"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Profile {
                action: ProfileCommands::Show
            }
        ));
    }

    #[test]
    fn search_parses_every_filter() {
        let cli = Cli::try_parse_from([
            "cflow",
            "search",
            "dashboard",
            "--language",
            "TypeScript",
            "--language",
            "Python",
            "--difficulty",
            "expert",
            "--price",
            "20-300",
            "--min-rating",
            "4",
            "--sort",
            "price",
            "--order",
            "asc",
            "--open-source",
            "--has-demo",
        ])
        .expect("search should parse");

        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.query.as_deref(), Some("dashboard"));
        assert_eq!(args.languages, ["TypeScript", "Python"]);
        assert_eq!(args.difficulties, [Difficulty::Expert]);
        assert_eq!(args.price, Some(PriceRange::new(20, 300)));
        assert_eq!(args.min_rating, Some(4));
        assert_eq!(args.sort, Some(SortField::Price));
        assert_eq!(args.order, Some(SortOrder::Asc));
        assert!(args.open_source);
        assert!(!args.verified_seller);
        assert!(args.has_demo);
    }

    #[test]
    fn search_rejects_out_of_range_rating() {
        assert!(Cli::try_parse_from(["cflow", "search", "--min-rating", "6"]).is_err());
    }

    #[test]
    fn search_rejects_unknown_pricing_model() {
        assert!(Cli::try_parse_from(["cflow", "search", "--pricing", "barter"]).is_err());
    }

    #[test]
    fn oauth_provider_is_a_value_enum() {
        let cli = Cli::try_parse_from(["cflow", "auth", "oauth", "github"])
            .expect("oauth should parse");
        let Commands::Auth {
            action: AuthCommands::Oauth(args),
        } = cli.command
        else {
            panic!("expected auth oauth");
        };
        assert_eq!(args.provider, ProviderArg::Github);
        assert_eq!(args.timeout_secs, 120);
    }

    #[test]
    fn otp_full_name_requires_signup() {
        assert!(
            Cli::try_parse_from(["cflow", "auth", "otp", "--phone", "+1555", "--full-name", "A"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from([
                "cflow",
                "auth",
                "otp",
                "--phone",
                "+1555",
                "--signup",
                "--full-name",
                "A"
            ])
            .is_ok()
        );
    }

    #[test]
    fn schema_type_is_kebab_case() {
        let cli = Cli::try_parse_from(["cflow", "schema", "filter-state"]).expect("should parse");
        let Commands::Schema(args) = cli.command else {
            panic!("expected schema");
        };
        assert_eq!(args.type_name, SchemaType::FilterState);
    }
}
