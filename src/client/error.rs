use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the station map client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable body
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the backend
    #[error("HTTP error! Status: {0}")]
    Status(u16),

    /// Body decoded but did not have the expected `{data: [...]}` shape
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Unknown station {0}")]
    UnknownStation(i32),

    #[error("Unknown region '{0}'")]
    UnknownRegion(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
