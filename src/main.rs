//! tint - status-bar theming and shell settings
//!
//! Samples frames the way the shell samples its live view, replays event
//! scripts through the theming engine, and manages the shell's endpoints
//! and cached credentials.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tint_shell::cli::commands::{Cli, Commands};
use tint_shell::cli::{auth, config, endpoints, replay, sample};
use tint_shell::error::Result;

fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config_path()?;

    match cli.command {
        Commands::Sample(args) => sample::handle_sample(args, &config_path),
        Commands::Appearance { color } => sample::handle_appearance(&color),
        Commands::Replay(args) => replay::handle_replay(args, &config_path),
        // Credentials live in the keyring, not the config file
        Commands::Auth(args) => auth::handle_auth(args.command),
        Commands::Endpoints(args) => endpoints::handle_endpoints(args.command, &config_path),
        Commands::Config(args) => config::handle_config(args.command, &config_path),
    }
}
