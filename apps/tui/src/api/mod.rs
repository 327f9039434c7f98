//! Access to the black-spot accident API.
//!
//! [`AccidentSource`] is the seam the rest of the crate talks to;
//! [`BlackspotClient`] is the HTTP implementation.

pub mod client;
pub mod models;

pub use client::{AccidentSource, BlackspotClient, DEFAULT_ENDPOINT, PAGE_NUMBER, PAGE_SIZE};
pub use models::{parse_envelope, AccidentRecord};

/// Errors that can occur while fetching accident data.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure or a non-success HTTP status.
    #[error("accident API unreachable: {message}")]
    Unreachable {
        /// HTTP status, when a response arrived at all.
        status: Option<u16>,
        message: String,
    },

    /// Response body did not have the expected JSON shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The API answered with a non-success result code.
    #[error("accident API returned {code}: {message}")]
    Upstream { code: String, message: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        Self::Unreachable {
            status: error.status().map(|status| status.as_u16()),
            message: error.to_string(),
        }
    }
}
