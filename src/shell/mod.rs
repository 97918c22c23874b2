//! Shell glue around the hosted web view
//!
//! Host-independent decisions for everything the shell does besides
//! theming: endpoint fallback, basic-auth challenges, permission requests,
//! file choosing and navigation.

pub mod auth;
pub mod endpoints;
pub mod file_chooser;
pub mod navigation;
pub mod permissions;

pub use auth::{AuthChallenge, AuthDecision, HttpAuthBroker};
pub use endpoints::{ConnectionReport, EndpointRotation, FallbackStep};
pub use file_chooser::FileChooser;
pub use navigation::{BackAction, Orientation, StatusBarMode};
pub use permissions::{OsPermission, PermissionChecker, PermissionOutcome, WebResource};
