//! # ObjectSkipper Communication
//!
//! Connection to the firmware's command interpreter.
//! Implements [`objectskipper_core::InterceptConnection`] over a Unix
//! domain socket using a newline-delimited JSON interception protocol.

pub mod communication;

pub use communication::{
    InterceptionMode, InterceptionReply, ShutdownHandle, SocketInterceptConnection,
    PROTOCOL_VERSION,
};
