//! Interception connection interface
//!
//! The filter consumes the firmware's command stream through this trait:
//! one code is received at a time and must be answered with exactly one
//! of [`InterceptConnection::resolve_code`] or
//! [`InterceptConnection::ignore_code`] before the next is received.

use crate::error::Result;
use crate::Code;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result reported when resolving a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResolveResult {
    /// Code completed successfully
    #[default]
    Success,
    /// Code completed with a warning
    Warning,
    /// Code failed
    Error,
}

impl fmt::Display for ResolveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// Source of intercepted codes and sink for filter decisions
pub trait InterceptConnection {
    /// Block until the next code arrives
    fn receive_code(&mut self) -> Result<Code>;

    /// Short-circuit the current code with a synthetic result
    fn resolve_code(&mut self, result: ResolveResult, message: &str) -> Result<()>;

    /// Let the current code pass through to the firmware unmodified
    fn ignore_code(&mut self) -> Result<()>;
}

impl<T: InterceptConnection + ?Sized> InterceptConnection for Box<T> {
    fn receive_code(&mut self) -> Result<Code> {
        (**self).receive_code()
    }

    fn resolve_code(&mut self, result: ResolveResult, message: &str) -> Result<()> {
        (**self).resolve_code(result, message)
    }

    fn ignore_code(&mut self) -> Result<()> {
        (**self).ignore_code()
    }
}
