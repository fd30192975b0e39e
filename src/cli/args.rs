use std::fmt::Write;
use std::path::PathBuf;

use ara_finder::PaletteKey;
use ara_finder::app_dirs;
use clap::{
    ArgAction, Args, ColorChoice, Parser, Subcommand, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

/// Produce the full version banner including config and data directories.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };
    let data_dir = match app_dirs::get_data_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("ara {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "data directory: {data_dir}");

    Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "ara",
    version,
    long_version = long_version(),
    about = "Search the ARA standard, control library and certification registry",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `ara` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "ARA_CONFIG",
        action = ArgAction::Append,
        global = true,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        global = true,
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'f',
        long,
        value_name = "PATH",
        global = true,
        help = "Load the corpus from a JSON fixture file (default: built-in sample corpus)"
    )]
    pub(crate) fixtures: Option<PathBuf>,
    #[arg(
        short = 'p',
        long = "print-config",
        global = true,
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        global = true,
        help = "Choose how to print the result (default: plain)"
    )]
    pub(crate) output: Option<OutputFormat>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// Surfaces reachable from the command line.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Full-page search across domains, controls and registry records.
    Search {
        #[arg(value_name = "QUERY", num_args = 1.., required = true)]
        query: Vec<String>,
    },
    /// Open the command palette, type a query and replay key presses.
    Palette(PaletteArgs),
    /// Filter the control library.
    Controls(ControlsArgs),
    /// Filter the certification registry.
    Registry(RegistryArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct PaletteArgs {
    #[arg(
        short = 'q',
        long,
        value_name = "QUERY",
        help = "Text typed after the palette opens (default: empty)"
    )]
    pub(crate) query: Option<String>,
    #[arg(
        short = 'k',
        long,
        value_enum,
        value_delimiter = ',',
        value_name = "KEY",
        help = "Comma-separated keys pressed after typing (default: none)"
    )]
    pub(crate) keys: Vec<KeyArg>,
}

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct ControlsArgs {
    #[arg(
        short = 'q',
        long,
        value_name = "QUERY",
        help = "Free-text filter (default: empty)"
    )]
    pub(crate) query: Option<String>,
    #[arg(long, value_name = "N", help = "Domain number (default: all)")]
    pub(crate) domain: Option<String>,
    #[arg(
        long,
        value_name = "LEVEL",
        help = "Applicable level, L1 to L3 (default: all)"
    )]
    pub(crate) level: Option<String>,
    #[arg(
        long,
        value_name = "METHOD",
        help = "Evaluation method: AT, HS, EI or CM (default: all)"
    )]
    pub(crate) method: Option<String>,
    #[arg(
        long,
        value_name = "CLASS",
        help = "Classification: Blocking or Conditional (default: all)"
    )]
    pub(crate) classification: Option<String>,
    #[arg(
        long = "min-risk",
        value_name = "N",
        help = "Minimum risk weight, inclusive (default: any)"
    )]
    pub(crate) min_risk: Option<String>,
    #[arg(
        long,
        value_name = "ID",
        help = "URL fragment naming a control to expand (default: none)"
    )]
    pub(crate) fragment: Option<String>,
    #[arg(
        long,
        value_name = "ID",
        value_delimiter = ',',
        help = "Comma-separated control ids to expand (default: none)"
    )]
    pub(crate) expand: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct RegistryArgs {
    #[arg(
        short = 'q',
        long,
        value_name = "QUERY",
        help = "Free-text filter (default: empty)"
    )]
    pub(crate) query: Option<String>,
    #[arg(long, value_name = "LEVEL", help = "Certification level (default: all)")]
    pub(crate) level: Option<String>,
    #[arg(long, value_name = "NAME", help = "Industry (default: all)")]
    pub(crate) industry: Option<String>,
    #[arg(long, value_name = "STATUS", help = "Certification status (default: all)")]
    pub(crate) status: Option<String>,
    #[arg(long, value_name = "STATUS", help = "Monitoring status (default: all)")]
    pub(crate) monitoring: Option<String>,
    #[arg(
        long,
        value_name = "ID",
        help = "URL fragment naming a certification to expand (default: none)"
    )]
    pub(crate) fragment: Option<String>,
    #[arg(
        long,
        value_name = "ID",
        value_delimiter = ',',
        help = "Comma-separated certification ids to expand (default: none)"
    )]
    pub(crate) expand: Vec<String>,
}

/// Palette keys accepted by `--keys`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum KeyArg {
    Up,
    Down,
    Enter,
    #[value(alias = "esc")]
    Escape,
}

impl From<KeyArg> for PaletteKey {
    fn from(key: KeyArg) -> Self {
        match key {
            KeyArg::Up => PaletteKey::Up,
            KeyArg::Down => PaletteKey::Down,
            KeyArg::Enter => PaletteKey::Enter,
            KeyArg::Escape => PaletteKey::Escape,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the CLI utility.
pub(crate) enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl OutputFormat {
    /// Return the string representation consumed by configuration loading.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
        }
    }
}
