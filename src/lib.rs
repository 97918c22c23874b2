//! tint-shell - core of a single-screen web-view app shell
//!
//! This library holds the host-independent logic of a shell that shows a
//! remote page in an embedded browser view: adaptive status-bar theming
//! from the rendered page, endpoint fallback, basic-auth credential
//! caching, and permission and file-chooser brokering.

pub mod cli;
pub mod core;
pub mod error;
pub mod shell;
pub mod theme;

pub use error::{Result, ShellError};
