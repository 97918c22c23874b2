//! Configuration CLI command handlers

use std::path::Path;

use crate::cli::commands::{load_config, ConfigCommand};
use crate::error::Result;

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand, config_path: &Path) -> Result<()> {
    match command {
        ConfigCommand::Path => {
            println!("{}", config_path.display());
        }
        ConfigCommand::Show => {
            let config = load_config(config_path)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommand::SetInset { pixels } => {
            let mut config = load_config(config_path)?;
            config.status_bar_inset = pixels;
            config.save_to(config_path)?;
            println!("Status bar inset set to {}px.", pixels);
        }
    }
    Ok(())
}
