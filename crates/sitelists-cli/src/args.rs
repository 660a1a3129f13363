use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sitelists")]
#[command(about = "Builds categorized domain blacklists from crawled metadata and vendor lists")]
#[command(version)]
pub struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Base directory holding the sources (default: current directory)
    #[arg(long, global = true, env = "SITELISTS_BASE")]
    pub base_dir: Option<PathBuf>,

    /// Config file (default: <base-dir>/sitelists.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Date of the reference list to use, YYYY-MM-DD (default: today)
    #[arg(long, global = true)]
    pub date: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build every genre and write the four blacklist files (default)
    Build,

    /// Clean the vendor dumps against the reference list
    PrepareVendor,

    /// Check the external blacklist payload against the reference list
    CheckExternal,

    /// List genre recipes
    Genres {
        /// Show a single genre in detail
        name: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a commented sitelists.toml if none exists
    Init,

    /// Show config file path
    Path,

    /// Print the effective configuration
    Show,
}
