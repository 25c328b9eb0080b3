//! Error types for talking to an Awtrix device

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwtrixError {
    /// The connection could not be established or broke mid-request.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The device answered with a status code outside the expected set.
    #[error("status code must be {expected:?} but actually {actual}")]
    StatusCode { expected: Vec<u16>, actual: u16 },

    /// The response body was non-empty but not valid JSON.
    #[error("failed to parse response body: {0}")]
    Parse(#[source] serde_json::Error),

    /// The request payload could not be serialized.
    #[error("failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("missing configuration: {0}")]
    MissingConfig(String),
}

impl AwtrixError {
    /// The status code the device answered with, if the failure was a status mismatch.
    pub fn status(&self) -> Option<u16> {
        match self {
            AwtrixError::StatusCode { actual, .. } => Some(*actual),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AwtrixError>;
