//! Error types for the posts client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the post
//! does not exist" from "the server returned an unexpected status." All other
//! non-2xx responses land in `Http` with the raw status code and body.
//! `Transport` covers failures where no response arrived at all.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The operation is declared but not implemented by this client.
    #[error("operation not supported: {0}")]
    Unsupported(&'static str),
}

impl ApiError {
    /// Coarse category used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "transport",
            ApiError::NotFound | ApiError::Http { .. } => "status",
            ApiError::Deserialization(_) => "parse",
            ApiError::Serialization(_) => "encode",
            ApiError::Unsupported(_) => "unsupported",
        }
    }
}
