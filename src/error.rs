// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the request layer
//!
//! Every request settles into either a payload or one of these errors.
//! Business failures carry the server envelope, transport failures carry
//! the HTTP status and body, and cancellations carry the tracking key so
//! callers can tell self-inflicted aborts apart from real failures.

use std::fmt;

use bytes::Bytes;
use thiserror::Error;

use crate::envelope::Envelope;

/// Result type alias for request layer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Business code reserved for authentication expiry
pub const AUTH_EXPIRED_CODE: i64 = 401;

/// Where an authentication expiry was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryTrigger {
    /// Envelope with business code 401
    Envelope,
    /// HTTP status 401 from the transport
    TransportStatus,
}

impl fmt::Display for ExpiryTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryTrigger::Envelope => write!(f, "envelope"),
            ExpiryTrigger::TransportStatus => write!(f, "transport status"),
        }
    }
}

/// Main error type for the request layer
#[derive(Error, Debug)]
pub enum Error {
    /// Network-level failure reported by reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Server answered with a non-success business code
    #[error("Request failed with code {code}: {message}")]
    Business {
        code: i64,
        message: String,
        envelope: Envelope,
    },

    /// Session expired; logout has already been triggered
    #[error("Authentication expired ({trigger}): {message}")]
    AuthExpired {
        trigger: ExpiryTrigger,
        code: i64,
        status: Option<u16>,
        message: String,
        /// The rejecting envelope, when the server sent one
        envelope: Option<Envelope>,
    },

    /// Non-2xx HTTP status other than 401
    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        message: String,
        body: Bytes,
    },

    /// Timeout error
    #[error("Operation timed out after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
        url: Option<String>,
    },

    /// Request was cancelled through the registry
    #[error("Request cancelled: {key}")]
    Cancelled { key: String },

    /// An interceptor refused to dispatch the request
    #[error("Request aborted: {0}")]
    Aborted(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a business error from a failed envelope
    pub fn business(envelope: Envelope) -> Self {
        Error::Business {
            code: envelope.code,
            message: envelope.message.clone().unwrap_or_default(),
            envelope,
        }
    }

    /// Create an auth expiry error. The code comes from the envelope and
    /// falls back to [`AUTH_EXPIRED_CODE`].
    pub fn auth_expired(
        trigger: ExpiryTrigger,
        status: Option<u16>,
        envelope: Option<Envelope>,
        message: impl Into<String>,
    ) -> Self {
        Error::AuthExpired {
            trigger,
            code: envelope.as_ref().map_or(AUTH_EXPIRED_CODE, |e| e.code),
            status,
            message: message.into(),
            envelope,
        }
    }

    /// Create a cancellation error
    pub fn cancelled(key: impl Into<String>) -> Self {
        Error::Cancelled { key: key.into() }
    }

    /// Create a timeout error with URL
    pub fn timeout_with_url(
        operation: impl Into<String>,
        duration_ms: u64,
        url: impl Into<String>,
    ) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: Some(url.into()),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this request was cancelled by the caller
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled { .. })
    }

    /// Check if this is an authentication expiry
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Error::AuthExpired { .. })
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Check if this is a business failure
    pub fn is_business(&self) -> bool {
        matches!(self, Error::Business { .. })
    }

    /// Check if this failed below the envelope layer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Status { .. } | Error::Timeout { .. }
        )
    }

    /// Business code if available
    pub fn business_code(&self) -> Option<i64> {
        match self {
            Error::Business { code, .. } => Some(*code),
            Error::AuthExpired { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::AuthExpired { status, .. } => *status,
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The envelope carried by a business failure or an envelope expiry
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            Error::Business { envelope, .. } => Some(envelope),
            Error::AuthExpired { envelope, .. } => envelope.as_ref(),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Timeout { url: Some(u), .. } => Some(u),
            Error::Http(e) => e.url().map(|u| u.as_str()),
            _ => None,
        }
    }

    /// Message suitable for a user-facing notice
    pub fn notice(&self) -> String {
        match self {
            Error::Business { message, .. }
            | Error::AuthExpired { message, .. }
            | Error::Status { message, .. } => message.clone(),
            other => other.to_string(),
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

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add URL context to error
    fn with_url(self, url: &str) -> Result<T>;

    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn with_url(self, url: &str) -> Result<T> {
        self.map_err(|e| match e.into() {
            Error::Timeout {
                operation,
                duration_ms,
                ..
            } => Error::Timeout {
                operation,
                duration_ms,
                url: Some(url.to_string()),
            },
            other => other,
        })
    }

    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}
