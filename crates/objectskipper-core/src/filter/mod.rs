//! Object filtering
//!
//! Learns which comment prefixes mark object boundaries and which objects
//! the operator cancelled, then suppresses the commands of cancelled
//! objects while everything else streams through untouched.

pub mod dispatcher;
pub mod matcher;
pub mod messages;
pub mod registry;
pub mod state;

pub use dispatcher::{ControlCodes, Decision, ObjectFilter};
pub use registry::{ObjectRegistry, PatternRegistry};
pub use state::FilterState;
