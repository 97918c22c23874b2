//! Endpoint CLI command handlers

use std::path::Path;

use crate::cli::commands::{load_config, EndpointsCommand};
use crate::core::config::Config;
use crate::error::{Result, ShellError};
use crate::shell::endpoints::{EndpointRotation, FallbackStep};

/// Handle endpoint commands
pub fn handle_endpoints(command: EndpointsCommand, config_path: &Path) -> Result<()> {
    match command {
        // Reset must work on a file whose endpoint list no longer validates
        EndpointsCommand::Reset => handle_reset(config_path),
        command => handle_with_config(command, config_path),
    }
}

fn handle_reset(config_path: &Path) -> Result<()> {
    let mut config = Config::read_from(config_path)?;
    config.reset_endpoints();
    config.save_to(config_path)?;
    println!("Endpoints reset to defaults.");
    Ok(())
}

fn handle_with_config(command: EndpointsCommand, config_path: &Path) -> Result<()> {
    let mut config = load_config(config_path)?;

    match command {
        EndpointsCommand::List => {
            for (index, endpoint) in config.endpoints.iter().enumerate() {
                println!("{}: {}", index, endpoint);
            }
        }
        EndpointsCommand::Add { url } => {
            if config.add_endpoint(&url)? {
                config.save_to(config_path)?;
                println!("Added endpoint: {}", url.trim());
            } else {
                println!("Endpoint already configured: {}", url.trim());
            }
        }
        EndpointsCommand::Remove { url } => {
            if !config.remove_endpoint(&url)? {
                return Err(ShellError::InvalidInput(format!(
                    "Endpoint '{}' is not configured.\n\n  → Run 'tint endpoints list' to see configured endpoints.",
                    url
                )));
            }
            config.save_to(config_path)?;
            println!("Removed endpoint: {}", url.trim());
        }
        EndpointsCommand::Reset => handle_reset(config_path)?,
        EndpointsCommand::Simulate { failures } => {
            let mut rotation = EndpointRotation::new(config.endpoints)?;
            println!("load {}", rotation.initial());

            for _ in 0..failures {
                match rotation.on_load_error(true) {
                    FallbackStep::Retry(url) => println!("load {}", url),
                    FallbackStep::Exhausted(report) => {
                        println!();
                        println!("{}", report.title());
                        println!("{}", report.message());
                        break;
                    }
                    FallbackStep::Ignored => {}
                }
            }
        }
    }

    Ok(())
}
