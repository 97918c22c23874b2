//! Secure storage for HTTP basic-auth credentials
//!
//! The shell remembers one username/password pair: the one the user last
//! entered in the login dialog. It is kept in the system keyring (macOS
//! Keychain, Linux Secret Service) as a single JSON entry, with an
//! in-memory cache to minimize keychain prompts.
//!
//! ## Environment Variable Fallback
//!
//! For development and CI, credentials can be supplied via environment
//! variables. Both must be set and non-empty:
//! - `TINT_AUTH_USERNAME`
//! - `TINT_AUTH_PASSWORD`
//!
//! Priority: env var > cache > keyring

use std::sync::RwLock;

use keyring::Entry;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ShellError};

const SERVICE_NAME: &str = "tint-shell";
const BASIC_AUTH_KEY: &str = "http_basic_auth";

// Environment variable names
const USERNAME_ENV: &str = "TINT_AUTH_USERNAME";
const PASSWORD_ENV: &str = "TINT_AUTH_PASSWORD";

/// Username and password answered to a basic-auth challenge
#[derive(Debug, Clone)]
pub struct BasicAuth {
    pub username: String,
    pub password: SecretString,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Both fields are non-empty
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.expose_secret().is_empty()
    }
}

/// Reads one environment variable by name
pub type EnvLookup = fn(&str) -> Option<String>;

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Serialized keyring form
#[derive(Serialize, Deserialize)]
struct StoredBasicAuth {
    username: String,
    password: String,
}

/// Credential store for the cached basic-auth pair
pub struct CredentialStore {
    entry: Entry,
    // Option<Option<T>>:
    //   - None = not yet fetched from keyring
    //   - Some(None) = fetched, but no credential exists
    //   - Some(Some(value)) = fetched and cached
    cache: RwLock<Option<Option<BasicAuth>>>,
    env: Option<EnvLookup>,
}

impl CredentialStore {
    /// Open the store backed by the system keyring
    pub fn new() -> Result<Self> {
        Ok(Self::with_entry(Entry::new(SERVICE_NAME, BASIC_AUTH_KEY)?))
    }

    /// Use a specific keyring entry
    pub fn with_entry(entry: Entry) -> Self {
        Self {
            entry,
            cache: RwLock::new(None),
            env: Some(process_env),
        }
    }

    /// Do not consult the environment variables
    pub fn ignore_env(mut self) -> Self {
        self.env = None;
        self
    }

    /// Read the credential variables through `lookup` instead of the
    /// process environment
    pub fn with_env_lookup(mut self, lookup: EnvLookup) -> Self {
        self.env = Some(lookup);
        self
    }

    /// Store credentials securely
    ///
    /// Updates both the keyring and the in-memory cache.
    pub fn store(&self, auth: &BasicAuth) -> Result<()> {
        let stored = StoredBasicAuth {
            username: auth.username.clone(),
            password: auth.password.expose_secret().to_string(),
        };
        let json = serde_json::to_string(&stored)?;
        self.entry.set_password(&json)?;

        // Update cache immediately
        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(Some(auth.clone()));
        }

        debug!(username = %auth.username, "Stored basic-auth credentials");
        Ok(())
    }

    /// Retrieve the stored credentials
    ///
    /// Priority: environment variables > cache > keyring
    pub fn get(&self) -> Result<Option<BasicAuth>> {
        // Priority 1: Check environment variables
        if let Some(lookup) = self.env {
            if let Some(auth) = Self::from_env(lookup) {
                return Ok(Some(auth));
            }
        }

        // Priority 2: Check cache
        if let Ok(cache) = self.cache.read() {
            if let Some(cached_value) = cache.as_ref() {
                return Ok(cached_value.clone());
            }
        }

        // Priority 3: Fetch from keyring and cache
        let result = self.fetch_from_keyring()?;

        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(result.clone());
        }

        Ok(result)
    }

    fn from_env(lookup: EnvLookup) -> Option<BasicAuth> {
        let username = lookup(USERNAME_ENV)?;
        let password = lookup(PASSWORD_ENV)?;
        let auth = BasicAuth::new(username, password);
        auth.is_complete().then_some(auth)
    }

    /// Fetch credentials directly from keyring (no cache)
    fn fetch_from_keyring(&self) -> Result<Option<BasicAuth>> {
        match self.entry.get_password() {
            Ok(json) => {
                let stored: StoredBasicAuth = serde_json::from_str(&json).map_err(|e| {
                    ShellError::Credential(format!("Invalid stored credentials: {}", e))
                })?;
                Ok(Some(BasicAuth::new(stored.username, stored.password)))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(ShellError::Credential(format!(
                "Cannot access system keychain. Make sure your keyring is unlocked. ({})",
                e
            ))),
        }
    }

    /// Delete the stored credentials
    ///
    /// Clears both the keyring and the in-memory cache.
    pub fn delete(&self) -> Result<()> {
        let result = match self.entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(ShellError::Credential(e.to_string())),
        };

        // Clear cache immediately
        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(None);
        }

        result
    }

    /// Forget the cached value so the next read goes to the keyring
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.write() {
            *cache = None;
        }
    }

    /// Check if complete credentials are available
    pub fn has_credentials(&self) -> Result<bool> {
        Ok(self.get()?.is_some_and(|auth| auth.is_complete()))
    }

    /// Get a masked version of a secret for display (shows first 2 and last 2 chars)
    pub fn mask(secret: &SecretString) -> String {
        let exposed = secret.expose_secret();
        let chars: Vec<char> = exposed.chars().collect();
        if chars.len() <= 6 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..2].iter().collect();
            let tail: String = chars[chars.len() - 2..].iter().collect();
            format!("{}...{}", head, tail)
        }
    }
}
