//! Errors raised while talking to a Radarr or Sonarr instance.

use reqwest::Method;
use thiserror::Error;

/// A failed call to an instance. Carries enough context (verb, URL, and for rejected requests
/// the status code and response body) to diagnose the failure from the logs alone.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to send {method} request to {url}.")]
    Request {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned status {status}: {body}")]
    Status {
        method: Method,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Could not parse the response body of {method} {url}.")]
    Decode {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    /// The status code returned by the instance, if a response was received at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request { source, .. } | TransportError::Decode { source, .. } => {
                source.status().map(|s| s.as_u16())
            }
        }
    }
}
