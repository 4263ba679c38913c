use cf_auth::OAuthProvider;
use clap::{Args, Subcommand, ValueEnum};

/// Authentication commands.
///
/// Form fields are optional on the command line so that missing input is
/// reported with the same messages as the sign-in screen.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Show current auth status.
    Status,
    /// Sign in with email and password.
    Login(AuthLoginArgs),
    /// Create an account with email and password.
    Signup(AuthSignupArgs),
    /// Send a one-time code to a phone number.
    Otp(AuthOtpArgs),
    /// Verify a phone one-time code and sign in.
    Verify(AuthVerifyArgs),
    /// Email a sign-in link.
    MagicLink(AuthMagicLinkArgs),
    /// Sign in through a third-party provider in the browser.
    Oauth(AuthOauthArgs),
    /// Sign out and clear the stored session.
    Logout,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: Option<String>,
    /// Password (or set CODEFLOW_PASSWORD).
    #[arg(long, env = "CODEFLOW_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuthSignupArgs {
    #[arg(long)]
    pub email: Option<String>,
    /// Password (or set CODEFLOW_PASSWORD).
    #[arg(long, env = "CODEFLOW_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// Full name stored on the new account.
    #[arg(long)]
    pub full_name: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuthOtpArgs {
    /// Phone number in international format.
    #[arg(long)]
    pub phone: Option<String>,
    /// Create the account if it does not exist.
    #[arg(long)]
    pub signup: bool,
    /// Full name for a new account.
    #[arg(long, requires = "signup")]
    pub full_name: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuthVerifyArgs {
    #[arg(long)]
    pub phone: Option<String>,
    /// The code received by SMS.
    #[arg(long)]
    pub code: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuthMagicLinkArgs {
    #[arg(long)]
    pub email: Option<String>,
    /// Where the link sends the user back to (defaults to the site callback).
    #[arg(long)]
    pub redirect_to: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuthOauthArgs {
    pub provider: ProviderArg,
    /// Seconds to wait for the browser callback.
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ProviderArg {
    Google,
    Github,
    Discord,
}

impl From<ProviderArg> for OAuthProvider {
    fn from(value: ProviderArg) -> Self {
        match value {
            ProviderArg::Google => Self::Google,
            ProviderArg::Github => Self::Github,
            ProviderArg::Discord => Self::Discord,
        }
    }
}
