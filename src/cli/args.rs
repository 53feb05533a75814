use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Command line arguments for LedCom
#[derive(Parser, Debug)]
#[command(
    name = "ledcom",
    version = env!("CARGO_PKG_VERSION"),
    about = "Bluetooth SPP command tool for addressable LED strip controllers",
    long_about = "Commands a previously paired LED strip controller over a Bluetooth \
                  RFCOMM (SPP) serial link: color, brightness, effect selection and power."
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Target controller address (overrides --device)
    #[arg(short, long, global = true)]
    pub address: Option<String>,

    /// Target controller alias from the configuration
    #[arg(short, long, global = true)]
    pub device: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List bonded Bluetooth peripherals
    Devices,
    /// List the fixed effect table
    Effects,
    /// Set the strip color
    Color {
        /// Red channel [0-255]
        r: u8,
        /// Green channel [0-255]
        g: u8,
        /// Blue channel [0-255]
        b: u8,
    },
    /// Set the global brightness
    Brightness {
        /// Brightness [0-255]
        value: u8,
    },
    /// Select an effect by index or name
    Effect {
        /// Effect index or name (see `ledcom effects`)
        effect: String,
    },
    /// Switch the strip on or off, or toggle when no state is given
    Power {
        /// Explicit power state
        #[arg(value_enum)]
        state: Option<PowerStateArg>,
    },
    /// Connect and replay the stored shadow state only
    Sync,
    /// Send a raw protocol command line (debugging aid)
    Raw {
        /// Command line, e.g. "B128"
        command: String,
    },
    /// Configuration management commands
    Config(ConfigArgs),
    /// Display version information
    Version,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Table output
    Table,
    /// CSV output
    Csv,
}

/// Explicit power state argument
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum PowerStateArg {
    On,
    Off,
}

/// Configuration management arguments
#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Create default project configuration
    Init,
    /// List configured controller aliases
    Devices,
    /// Add a controller alias
    AddDevice {
        /// Alias name
        name: String,
        /// Bonded hardware address
        address: String,
        /// Entry description
        #[arg(long)]
        description: Option<String>,
    },
}

impl From<PowerStateArg> for bool {
    fn from(state: PowerStateArg) -> Self {
        matches!(state, PowerStateArg::On)
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Text
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
