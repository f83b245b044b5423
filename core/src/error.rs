//! Error types for the admin API client.
//!
//! # Design
//! `Network` and `HttpStatus` are the two failure kinds a caller sees from a
//! round-trip: nothing came back, or something came back with a non-2xx
//! status. Encoding problems on either side get their own variants. Every
//! variant renders a message, which is what stores record.

use thiserror::Error;

/// Errors returned by `ApiClient` parse methods, transports and API modules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Status code of an `HttpStatus` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Errors raised while loading `ClientConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API base URL {0:?}: expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}
