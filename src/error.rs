use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::OsmKind;

/// Failure to turn a place description into a [`crate::Place`]
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("failed to send request to the geocoding service: {0}")]
    Request(#[source] reqwest::Error),

    #[error("geocoding service returned error status: {0}")]
    Status(StatusCode),

    #[error("malformed geocoding response: {0}")]
    Malformed(String),

    #[error("no match for requested kind `{kind}` in results for '{query}'")]
    NoMatch { query: String, kind: OsmKind },
}

/// Failure to compute a [`crate::Route`] between two places
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("failed to send request to the routing service: {0}")]
    Request(#[source] reqwest::Error),

    #[error("malformed routing response: {0}")]
    Malformed(String),

    /// OSRM reports its outcome in the JSON body, not the HTTP status
    #[error("routing service returned code {code}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status {
        code: String,
        message: Option<String>,
    },

    #[error("routing service found no route between {from:?} and {to:?}")]
    NoRoute { from: (f64, f64), to: (f64, f64) },
}
