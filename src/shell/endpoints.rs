//! Endpoint fallback
//!
//! The shell knows a fixed, ordered list of places the page may be served
//! from. It loads the first; each main-frame load failure moves on to the
//! next, and once the last one has failed the user is shown a report
//! listing every endpoint.

use std::fmt;

use tracing::{info, warn};
use url::Url;

use crate::error::{Result, ShellError};

/// Validate an endpoint string
pub fn parse_endpoint(endpoint: &str) -> Result<Url> {
    Url::parse(endpoint.trim()).map_err(|_| ShellError::InvalidEndpoint(endpoint.to_string()))
}

/// What the host should do after a load error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackStep {
    /// The error came from a sub-resource; keep the current page
    Ignored,
    /// Load this endpoint next
    Retry(String),
    /// Every endpoint failed; show the report
    Exhausted(ConnectionReport),
}

/// Summary shown once all endpoints have failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionReport {
    pub endpoints: Vec<String>,
}

impl ConnectionReport {
    pub fn title(&self) -> &'static str {
        "Connection Error"
    }

    /// Dialog body listing every endpoint
    pub fn message(&self) -> String {
        let entries = self
            .endpoints
            .iter()
            .enumerate()
            .map(|(index, url)| format!("URL {}: {}\nError: Unable to connect", index, url))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!("Failed to connect to all URLs:\n\n{}", entries)
    }
}

impl fmt::Display for ConnectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Position in the endpoint list
#[derive(Debug, Clone)]
pub struct EndpointRotation {
    endpoints: Vec<String>,
    index: usize,
}

impl EndpointRotation {
    /// Build a rotation over validated endpoints
    pub fn new(endpoints: Vec<String>) -> Result<Self> {
        if endpoints.is_empty() {
            return Err(ShellError::NoEndpoints);
        }
        for endpoint in &endpoints {
            parse_endpoint(endpoint)?;
        }

        Ok(Self {
            endpoints,
            index: 0,
        })
    }

    /// Endpoint to load when the view is first created
    pub fn initial(&self) -> &str {
        &self.endpoints[0]
    }

    pub fn current(&self) -> &str {
        &self.endpoints[self.index]
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// React to a load error
    pub fn on_load_error(&mut self, is_main_frame: bool) -> FallbackStep {
        if !is_main_frame {
            return FallbackStep::Ignored;
        }

        if self.index + 1 < self.endpoints.len() {
            warn!(failed = %self.current(), "Endpoint failed to load, trying next");
            self.index += 1;
            info!(endpoint = %self.current(), "Loading fallback endpoint");
            FallbackStep::Retry(self.current().to_string())
        } else {
            warn!("All {} endpoints failed to load", self.endpoints.len());
            FallbackStep::Exhausted(ConnectionReport {
                endpoints: self.endpoints.clone(),
            })
        }
    }

    /// Start over from the first endpoint
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_ENDPOINTS;

    fn rotation() -> EndpointRotation {
        EndpointRotation::new(DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_walks_list_then_exhausts() {
        let mut rotation = rotation();
        assert_eq!(rotation.initial(), "example1:88888");

        assert_eq!(
            rotation.on_load_error(true),
            FallbackStep::Retry("https://www.example2.com".into())
        );
        assert_eq!(
            rotation.on_load_error(true),
            FallbackStep::Retry("http://example3.com".into())
        );
        assert!(matches!(rotation.on_load_error(true), FallbackStep::Exhausted(_)));
        // Stays exhausted on the last endpoint.
        assert_eq!(rotation.current_index(), 2);
        assert!(matches!(rotation.on_load_error(true), FallbackStep::Exhausted(_)));
    }

    #[test]
    fn test_subframe_errors_are_ignored() {
        let mut rotation = rotation();
        assert_eq!(rotation.on_load_error(false), FallbackStep::Ignored);
        assert_eq!(rotation.current(), "example1:88888");
    }

    #[test]
    fn test_report_message() {
        let report = ConnectionReport {
            endpoints: vec!["http://a.test".into(), "http://b.test".into()],
        };
        assert_eq!(
            report.message(),
            "Failed to connect to all URLs:\n\n\
             URL 0: http://a.test\nError: Unable to connect\n\n\
             URL 1: http://b.test\nError: Unable to connect"
        );
    }

    #[test]
    fn test_single_endpoint_exhausts_immediately() {
        let mut rotation = EndpointRotation::new(vec!["https://only.test".into()]).unwrap();
        match rotation.on_load_error(true) {
            FallbackStep::Exhausted(report) => assert_eq!(report.endpoints.len(), 1),
            other => panic!("unexpected step {:?}", other),
        }

        rotation.reset();
        assert_eq!(rotation.current(), "https://only.test");
    }

    #[test]
    fn test_rejects_empty_and_invalid_lists() {
        assert!(matches!(
            EndpointRotation::new(Vec::new()),
            Err(ShellError::NoEndpoints)
        ));
        assert!(matches!(
            EndpointRotation::new(vec!["https://ok.test".into(), "not a url".into()]),
            Err(ShellError::InvalidEndpoint(_))
        ));
    }
}
