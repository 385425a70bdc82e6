//! Interception protocol messages
//!
//! Every message is a single JSON object terminated by a newline.

use objectskipper_core::ResolveResult;
use serde::{Deserialize, Serialize};

/// Protocol version sent in the init message
pub const PROTOCOL_VERSION: u32 = 11;

/// First message sent by the server after accepting a connection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerInitMessage {
    /// Server protocol version
    pub version: u32,
    /// Connection id assigned by the server
    #[serde(default)]
    pub id: u32,
}

/// Connection mode requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionMode {
    /// Receive codes before the firmware does and decide their fate
    Intercept,
}

/// Point in the pipeline at which codes are intercepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterceptionMode {
    /// Before the code is processed by the interpreter
    #[default]
    Pre,
    /// After internal processing, before the firmware executes it
    Post,
    /// After the firmware has executed it
    Executed,
}

impl std::fmt::Display for InterceptionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pre => write!(f, "Pre"),
            Self::Post => write!(f, "Post"),
            Self::Executed => write!(f, "Executed"),
        }
    }
}

/// Init message sent by the client to enter interception mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterceptInitMessage {
    /// Always [`ConnectionMode::Intercept`]
    pub mode: ConnectionMode,
    /// Client protocol version
    pub version: u32,
    /// Where in the pipeline to intercept
    pub interception_mode: InterceptionMode,
}

impl InterceptInitMessage {
    /// Create an init message for `mode`
    pub fn new(interception_mode: InterceptionMode) -> Self {
        Self {
            mode: ConnectionMode::Intercept,
            version: PROTOCOL_VERSION,
            interception_mode,
        }
    }
}

/// Server acknowledgement of a client request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse {
    /// Whether the request succeeded
    pub success: bool,
    /// Error category if it failed
    #[serde(default)]
    pub error_type: Option<String>,
    /// Error text if it failed
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Decision sent back for an intercepted code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum InterceptionReply {
    /// Pass the code on unmodified
    Ignore,
    /// Complete the code with a synthetic result
    Resolve {
        /// Reported result
        #[serde(rename = "type")]
        result: ResolveResult,
        /// Message shown to the operator
        content: String,
    },
}
