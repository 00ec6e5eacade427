// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for easyhttp
//!
//! Transport failures from reqwest pass through untouched in [`Error::Http`].
//! The wrapper layer adds its own kinds only at the call sites that raise
//! them: status checks, JSON field access, and pending-response settlement.

use std::sync::Arc;

use thiserror::Error;

/// Result type alias for easyhttp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for easyhttp
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed in the underlying client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Name-based dispatch referenced a verb the client does not implement
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Response status indicates a client or server error
    #[error("HTTP request returned status code {status}.")]
    Status { status: u16 },

    /// JSON field absent from the decoded body
    #[error("Key not found in response data: {0}")]
    KeyNotFound(String),

    /// Attempt to write through the array-style accessors
    #[error("Response data may not be mutated using array access.")]
    ImmutableData,

    /// Pending request was cancelled before it settled
    #[error("Request was cancelled")]
    Cancelled,

    /// Pending request settled with a rejection
    #[error("Request rejected: {0}")]
    Rejected(#[source] Arc<Error>),

    /// Resolve or reject on a promise that has already settled
    #[error("Promise has already settled")]
    AlreadySettled,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            Error::Rejected(inner) => inner.status_code(),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code()
            .map(|s| (400..500).contains(&s))
            .unwrap_or(false)
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code().map(|s| s >= 500).unwrap_or(false)
    }

    /// Check if the request was cancelled, directly or as a rejection reason
    pub fn is_cancelled(&self) -> bool {
        match self {
            Error::Cancelled => true,
            Error::Rejected(inner) => inner.is_cancelled(),
            _ => false,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
