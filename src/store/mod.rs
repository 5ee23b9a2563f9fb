pub mod document_client;

pub use document_client::DocumentClient;

use thiserror::Error;

/// Failures talking to the hosted document store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} responded with status {status}")]
    Status {
        path: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
