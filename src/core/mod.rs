//! Core functionality for tint-shell
//!
//! This module contains shared state that outlives a single view:
//! - Application configuration
//! - Credential management

pub mod config;
pub mod credentials;

pub use config::Config;
pub use credentials::{BasicAuth, CredentialStore};
