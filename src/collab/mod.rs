//! Plumbing shared by the external collaborators (news search, summarizers).
//!
//! - [`RetryPolicy`] - bounded retries with exponential backoff
//! - [`TtlCache`] - in-memory memo with a fixed entry lifetime
//! - [`Outcome`] - what the report shows for a collaborator call

pub mod cache;
pub mod retry;

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Serialize;

use crate::error::{RadarError, Result};

pub use cache::TtlCache;
pub use retry::RetryPolicy;

/// Result of a collaborator call as seen by the report.
///
/// Failures never abort the pipeline; they degrade to one of the non-ready
/// variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// The call succeeded.
    Ready(T),
    /// The call failed after retries; carries a short reason.
    Unavailable(String),
    /// The collaborator lacks credentials; carries the service name.
    NotConfigured(&'static str),
}

impl<T> Outcome<T> {
    /// Converts a collaborator result into an outcome.
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Outcome::Ready(value),
            Err(RadarError::MissingCredentials { service, .. }) => Outcome::NotConfigured(service),
            Err(e) => Outcome::Unavailable(e.to_string()),
        }
    }

    /// Returns the value if the call succeeded.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Outcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Outcome::Ready(_))
    }

    pub fn is_not_configured(&self) -> bool {
        matches!(self, Outcome::NotConfigured(_))
    }

    /// Maps the ready value, keeping failure variants.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Ready(value) => Outcome::Ready(f(value)),
            Outcome::Unavailable(reason) => Outcome::Unavailable(reason),
            Outcome::NotConfigured(service) => Outcome::NotConfigured(service),
        }
    }
}

/// Builds a blocking HTTP client for a collaborator.
pub(crate) fn http_client(service: &'static str, timeout: Duration, user_agent: &str) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| RadarError::http(service, e))
}

/// Passes successful responses through and turns the rest into errors.
pub(crate) fn check_status(service: &'static str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(RadarError::status(service, status.as_u16(), body))
}
