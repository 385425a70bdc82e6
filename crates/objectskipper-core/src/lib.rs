//! # ObjectSkipper Core
//!
//! Core types and the filtering state machine for ObjectSkipper.
//! Provides the intercepted code model, the connection seam the filter
//! consumes, and the object filter itself.

pub mod code;
pub mod connection;
pub mod error;
pub mod filter;

pub use code::{Code, CodeKind, CodeParameter, CodeType, ParameterValue};
pub use connection::{InterceptConnection, ResolveResult};
pub use error::{ConnectionError, Result};
pub use filter::{ControlCodes, Decision, FilterState, ObjectFilter, ObjectRegistry, PatternRegistry};
