//! Credential CLI command handlers

use std::io::{self, Write};

use crate::cli::commands::AuthCommand;
use crate::core::credentials::{BasicAuth, CredentialStore};
use crate::error::{Result, ShellError};

/// Handle credential commands
pub fn handle_auth(command: AuthCommand) -> Result<()> {
    let store = CredentialStore::new()?;

    match command {
        AuthCommand::Set { username, password } => handle_set(&store, username, password),
        AuthCommand::Status => handle_status(&store),
        AuthCommand::Clear => {
            store.delete()?;
            println!("Stored credentials have been removed.");
            Ok(())
        }
    }
}

fn handle_set(store: &CredentialStore, username: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let auth = BasicAuth::new(username, password);
    if !auth.is_complete() {
        return Err(ShellError::InvalidInput(
            "Username and password must both be non-empty.".into(),
        ));
    }

    store.store(&auth)?;
    println!("Credentials for '{}' have been stored securely.", auth.username);
    Ok(())
}

fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush().ok();

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

fn handle_status(store: &CredentialStore) -> Result<()> {
    match store.get()? {
        Some(auth) => {
            println!("Username: {}", auth.username);
            println!("Password: {}", CredentialStore::mask(&auth.password));
        }
        None => println!(
            "No credentials stored. The login dialog will be shown on the next challenge."
        ),
    }
    Ok(())
}
