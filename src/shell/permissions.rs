//! Camera and microphone permission brokering
//!
//! Web content asks for capture resources; the OS grants permissions. The
//! broker maps one onto the other, grants straight away when the OS has
//! already allowed everything, and otherwise asks the host to prompt for
//! the missing permissions. A full grant from the prompt reloads the page
//! so the content can retry.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::error::{Result, ShellError};

/// Capture resource requested by web content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebResource {
    AudioCapture,
    VideoCapture,
}

impl WebResource {
    /// OS permission backing this resource
    pub fn os_permission(&self) -> OsPermission {
        match self {
            WebResource::AudioCapture => OsPermission::RecordAudio,
            WebResource::VideoCapture => OsPermission::Camera,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WebResource::AudioCapture => "audio-capture",
            WebResource::VideoCapture => "video-capture",
        }
    }
}

impl FromStr for WebResource {
    type Err = ShellError;

    /// Accepts the short names and the browser's namespaced resource ids
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "audio-capture" | "android.webkit.resource.AUDIO_CAPTURE" => {
                Ok(WebResource::AudioCapture)
            }
            "video-capture" | "android.webkit.resource.VIDEO_CAPTURE" => {
                Ok(WebResource::VideoCapture)
            }
            other => Err(ShellError::UnknownResource(other.to_string())),
        }
    }
}

impl fmt::Display for WebResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Runtime permission held by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsPermission {
    RecordAudio,
    Camera,
}

impl OsPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsPermission::RecordAudio => "android.permission.RECORD_AUDIO",
            OsPermission::Camera => "android.permission.CAMERA",
        }
    }
}

/// Host query for already-granted permissions
#[cfg_attr(test, mockall::automock)]
pub trait PermissionChecker {
    fn is_granted(&self, permission: OsPermission) -> bool;
}

/// Decision for one web permission request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionOutcome {
    /// Grant these resources to the page now
    Grant(Vec<WebResource>),
    /// Ask the OS for these permissions first
    RequestFromOs(Vec<OsPermission>),
}

/// Parse the resource ids of a request
///
/// Any unknown id fails the whole request.
pub fn parse_resources<S: AsRef<str>>(resources: &[S]) -> Result<Vec<WebResource>> {
    resources.iter().map(|r| r.as_ref().parse()).collect()
}

/// Decide how to answer a web permission request
pub fn handle_request<C: PermissionChecker + ?Sized>(
    resources: &[WebResource],
    checker: &C,
) -> PermissionOutcome {
    let mut missing: Vec<OsPermission> = Vec::new();
    for permission in resources.iter().map(WebResource::os_permission) {
        if !checker.is_granted(permission) && !missing.contains(&permission) {
            missing.push(permission);
        }
    }

    if missing.is_empty() {
        debug!(?resources, "Granting web permission request");
        PermissionOutcome::Grant(resources.to_vec())
    } else {
        info!(?missing, "Requesting OS permissions");
        PermissionOutcome::RequestFromOs(missing)
    }
}

/// Whether the page should reload after the OS answered a permission prompt
pub fn should_reload_after(results: &[(OsPermission, bool)]) -> bool {
    results.iter().all(|(_, granted)| *granted)
}
