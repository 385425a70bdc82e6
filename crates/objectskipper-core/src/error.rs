//! Error handling for ObjectSkipper
//!
//! Errors raised while talking to the firmware's command interpreter.
//! The filter itself never fails: malformed control parameters fall back
//! to defaults, so the only fallible edge is the interception connection.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;

/// Interception connection error type
///
/// Represents failures receiving codes from, or delivering decisions to,
/// the command interpreter.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Underlying socket I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A message could not be encoded or decoded
    #[error("Protocol error: {message}")]
    Protocol {
        /// What was wrong with the message.
        message: String,
    },

    /// The peer closed the connection
    #[error("Connection closed by peer")]
    Disconnected,

    /// The server refused the interception handshake
    #[error("Handshake rejected ({error_type}): {message}")]
    HandshakeRejected {
        /// Server-side error category.
        error_type: String,
        /// Human-readable reason.
        message: String,
    },
}

impl ConnectionError {
    /// Create a protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ConnectionError {
    fn from(err: serde_json::Error) -> Self {
        Self::protocol(err.to_string())
    }
}

/// Result type for connection operations
pub type Result<T> = std::result::Result<T, ConnectionError>;
