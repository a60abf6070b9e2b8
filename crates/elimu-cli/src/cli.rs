//! CLI argument definitions for the `elimu` driver.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use elimu_cli::settings::SettingKey;

#[derive(Parser)]
#[command(
    name = "elimu",
    version,
    about = "Elimu Online storefront driver - browse pages and resources from the terminal",
    long_about = "Drive the Elimu Online storefront without a browser.\n\n\
                  Resolve paths against the route table, render pages as HTML,\n\
                  list learning resources, manage your login and start M-Pesa payments."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Backend base URL for this run (overrides the saved settings).
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Host the storefront is served from; `localhost` selects the local backend.
    #[arg(long = "host", value_name = "HOST", global = true)]
    pub host: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the route table in match order.
    Routes,

    /// Show which route a path resolves to.
    Resolve(ResolveArgs),

    /// Render a page the way the storefront would and print it.
    Browse(BrowseArgs),

    /// List learning resources.
    Resources(ResourcesArgs),

    /// Create an account.
    Register(RegisterArgs),

    /// Sign in and remember the session.
    Login(LoginArgs),

    /// Forget the stored session.
    Logout,

    /// Show the signed-in user.
    Whoami,

    /// Check whether you have unlocked a resource.
    Paid(PaidArgs),

    /// Start an M-Pesa payment for a resource.
    Pay(PayArgs),

    /// Show or change saved settings.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// Paths or URLs to resolve.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,
}

#[derive(Parser)]
pub struct BrowseArgs {
    /// Path to open.
    #[arg(value_name = "PATH", default_value = "/")]
    pub path: String,

    /// Print the first render only, without loading data.
    #[arg(long = "no-data")]
    pub no_data: bool,

    /// What to print.
    #[arg(long = "format", value_enum, default_value = "html")]
    pub format: PageFormatArg,
}

#[derive(Parser)]
pub struct ResourcesArgs {
    /// Dashboard section (notes, ebooks, exams, schemes, lessons).
    #[arg(long = "section", value_name = "SECTION")]
    pub section: Option<String>,

    /// Level slug (lower-primary, upper-primary, junior-high, high-school).
    #[arg(long = "level", value_name = "SLUG")]
    pub level: Option<String>,

    /// Only list free resources.
    #[arg(long = "free")]
    pub free: bool,

    /// Only list resources whose title contains this text.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Print normalized resources as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct RegisterArgs {
    /// Account email.
    #[arg(long = "email")]
    pub email: String,

    /// Display name.
    #[arg(long = "name", default_value = "")]
    pub name: String,

    /// Password; read from stdin when omitted.
    #[arg(long = "password")]
    pub password: Option<String>,
}

#[derive(Parser)]
pub struct LoginArgs {
    /// Account email.
    #[arg(long = "email")]
    pub email: String,

    /// Password; read from stdin when omitted.
    #[arg(long = "password")]
    pub password: Option<String>,

    /// Use the `/token/` endpoint of older backends.
    #[arg(long = "legacy")]
    pub legacy: bool,
}

#[derive(Parser)]
pub struct PaidArgs {
    /// Resource id.
    #[arg(value_name = "RESOURCE_ID")]
    pub resource_id: i64,
}

#[derive(Parser)]
pub struct PayArgs {
    /// Resource id.
    #[arg(value_name = "RESOURCE_ID")]
    pub resource_id: i64,

    /// Safaricom number that receives the STK push (07XXXXXXXX).
    #[arg(long = "phone")]
    pub phone: String,
}

#[derive(Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print current settings.
    Show,

    /// Change one setting and save.
    Set {
        /// Setting to change.
        #[arg(value_enum)]
        key: SettingKey,
        /// New value (empty clears base-url).
        value: String,
    },

    /// Restore defaults and save.
    Reset,

    /// Print where settings and the session are stored.
    Path,
}

/// What `browse` prints.
#[derive(Clone, Copy, ValueEnum)]
pub enum PageFormatArg {
    /// The mounted HTML.
    Html,
    /// Visible text only.
    Text,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
