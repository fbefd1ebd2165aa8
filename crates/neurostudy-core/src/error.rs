//! Core error types for neurostudy-core.
//!
//! This module defines the error hierarchy using thiserror. Every failure is
//! scoped to the operation that triggered it; nothing here is fatal to the
//! process.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for neurostudy-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// File/content upload rejected before processing
    #[error("{0}")]
    Upload(#[from] UploadError),

    /// AI gateway (tutor / notes endpoint) errors
    #[error("{0}")]
    Gateway(#[from] GatewayError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// A stored row could not be decoded
    #[error("Corrupt row in {table}: {message}")]
    CorruptRow { table: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Unknown identifier
    #[error("No {kind} with id '{id}'")]
    NotFound { kind: String, id: String },

    /// A focus session can only be finalized once
    #[error("Focus session {0} has already ended")]
    SessionAlreadyEnded(String),

    /// A chat turn is still streaming
    #[error("A tutor reply is still in progress")]
    TurnInProgress,

    /// Nothing to send
    #[error("Message is empty")]
    EmptyMessage,
}

/// Upload validation errors. Surfaced inline; no partial state is kept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("File size must be less than 5MB")]
    TooLarge { size: u64, limit: u64 },

    #[error("Only .txt, .md, and .pdf files are accepted")]
    UnsupportedType { extension: String },

    #[error("Failed to read file content")]
    Unreadable,
}

/// Errors from the AI gateway endpoints (tutor chat, notes generation).
///
/// Upstream status codes map to distinct variants so callers can show a
/// specific message instead of a generic failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// HTTP 429
    #[error("rate limited: {}", .message.as_deref().unwrap_or("-"))]
    RateLimited { message: Option<String> },

    /// HTTP 402
    #[error("quota exhausted: {}", .message.as_deref().unwrap_or("-"))]
    QuotaExhausted { message: Option<String> },

    /// HTTP 413
    #[error("input too large: {}", .message.as_deref().unwrap_or("-"))]
    PayloadTooLarge { message: Option<String> },

    /// Any other non-2xx status
    #[error("service unavailable (HTTP {status}): {}", .message.as_deref().unwrap_or("-"))]
    Unavailable { status: u16, message: Option<String> },

    /// Connection or request failure before a response arrived
    #[error("network error: {0}")]
    Network(String),

    /// Transport failure while reading a streamed response
    #[error("stream interrupted: {0}")]
    Stream(String),

    /// Response body could not be decoded
    #[error("unexpected response: {0}")]
    Parse(String),

    /// Endpoint or credentials missing
    #[error("gateway not configured: {0}")]
    NotConfigured(String),
}

impl GatewayError {
    /// Build the error for a non-success status, keeping the server's
    /// `{ "error": ... }` text when it sent one.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            429 => GatewayError::RateLimited { message },
            402 => GatewayError::QuotaExhausted { message },
            413 => GatewayError::PayloadTooLarge { message },
            _ => GatewayError::Unavailable { status, message },
        }
    }

    /// Text to show the student.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::RateLimited { message } => message
                .clone()
                .unwrap_or_else(|| "Rate limit exceeded. Please try again in a moment.".into()),
            GatewayError::QuotaExhausted { message } => message
                .clone()
                .unwrap_or_else(|| "AI credits exhausted. Please try again later.".into()),
            GatewayError::PayloadTooLarge { message } => message.clone().unwrap_or_else(|| {
                "This file is too large to summarize at once. Please upload a smaller file or split the content into multiple parts.".into()
            }),
            GatewayError::Unavailable { message, .. } => message
                .clone()
                .unwrap_or_else(|| "AI service temporarily unavailable".into()),
            GatewayError::Network(_) | GatewayError::Stream(_) => {
                "Could not reach the AI service. Check your connection and try again.".into()
            }
            GatewayError::Parse(_) => "The AI service sent a response we could not read.".into(),
            GatewayError::NotConfigured(what) => format!("AI service is not configured: {what}"),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Parse(err.to_string())
        } else if err.is_body() {
            GatewayError::Stream(err.to_string())
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_distinct_variants() {
        assert!(matches!(
            GatewayError::from_status(429, None),
            GatewayError::RateLimited { .. }
        ));
        assert!(matches!(
            GatewayError::from_status(402, None),
            GatewayError::QuotaExhausted { .. }
        ));
        assert!(matches!(
            GatewayError::from_status(413, None),
            GatewayError::PayloadTooLarge { .. }
        ));
        assert!(matches!(
            GatewayError::from_status(500, None),
            GatewayError::Unavailable { status: 500, .. }
        ));
    }

    #[test]
    fn user_messages_are_distinct_without_server_text() {
        let messages: Vec<String> = [429u16, 402, 413, 503]
            .iter()
            .map(|s| GatewayError::from_status(*s, None).user_message())
            .collect();
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn server_text_wins_when_present() {
        let err = GatewayError::from_status(429, Some("Slow down".into()));
        assert_eq!(err.user_message(), "Slow down");
    }
}
