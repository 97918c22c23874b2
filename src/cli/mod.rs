//! CLI module for tint-shell
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod auth;
pub mod commands;
pub mod config;
pub mod endpoints;
pub mod replay;
pub mod sample;

pub use commands::{Cli, Commands};
