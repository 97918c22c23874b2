//! CLI command definitions using clap
//!
//! Defines the command structure for the `tint` CLI tool.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::error::Result;

/// tint - status-bar theming and shell settings
///
/// Samples screenshots the way the shell samples its live view, replays
/// event sequences through the theming engine, and manages the shell's
/// endpoints and cached credentials.
#[derive(Parser, Debug)]
#[command(name = "tint", version, about, long_about = None)]
pub struct Cli {
    /// Use this configuration file instead of the default location
    #[arg(long, global = true, env = "TINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Path of the configuration file in effect
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }
}

/// Load the configuration from `path`
pub fn load_config(path: &Path) -> Result<Config> {
    Config::load_from(path)
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sample the dominant status-bar color of an image
    Sample(SampleArgs),

    /// Show the foreground directive for a color
    Appearance {
        /// Hex color, e.g. #1e1e2e
        color: String,
    },

    /// Replay a timed event script through the theming engine
    Replay(ReplayArgs),

    /// Manage cached HTTP basic-auth credentials
    Auth(AuthArgs),

    /// Manage the endpoint fallback list
    Endpoints(EndpointsArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Theming Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Sampling arguments
#[derive(Parser, Debug)]
pub struct SampleArgs {
    /// Screenshot or rendered frame to sample
    pub image: PathBuf,

    /// Status-bar height to skip (defaults to the configured inset)
    #[arg(long, short)]
    pub offset: Option<u32>,
}

/// Replay arguments
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Frame the surface renders for every sample
    pub image: PathBuf,

    /// Comma-separated `<ms>:<event>` list, e.g. "0:started,40:scroll,45:scroll"
    ///
    /// Events: started, progress=<0-100>, finished, scroll, insets=<px>, teardown
    #[arg(long, short)]
    pub events: String,

    /// Status-bar height to skip (defaults to the configured inset)
    #[arg(long, short)]
    pub offset: Option<u32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Credential commands
#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Store basic-auth credentials
    Set {
        /// Username
        #[arg(long, short)]
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(long, short)]
        password: Option<String>,
    },
    /// Show the stored credentials (password masked)
    Status,
    /// Remove stored credentials
    Clear,
}

// ─────────────────────────────────────────────────────────────────────────────
// Endpoint Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Endpoint commands
#[derive(Parser, Debug)]
pub struct EndpointsArgs {
    #[command(subcommand)]
    pub command: EndpointsCommand,
}

#[derive(Subcommand, Debug)]
pub enum EndpointsCommand {
    /// List endpoints in the order they are tried
    List,

    /// Append an endpoint
    Add {
        /// Endpoint URL
        url: String,
    },

    /// Remove an endpoint
    Remove {
        /// Endpoint URL
        url: String,
    },

    /// Restore the built-in endpoint list
    Reset,

    /// Show what the shell would load after a number of main-frame failures
    Simulate {
        /// Number of consecutive load failures
        #[arg(long, short, default_value = "1")]
        failures: usize,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the configuration file path
    Path,

    /// Print the effective configuration
    Show,

    /// Set the default status-bar inset in pixels
    SetInset {
        /// Inset height
        pixels: u32,
    },
}
