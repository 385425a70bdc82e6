//! Transport to the command interpreter

pub mod protocol;
pub mod socket;

pub use protocol::{InterceptionMode, InterceptionReply, PROTOCOL_VERSION};
pub use socket::{ShutdownHandle, SocketInterceptConnection};
