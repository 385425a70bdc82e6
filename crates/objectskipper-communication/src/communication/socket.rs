//! Unix domain socket interception connection
//!
//! Connects to the command interpreter's socket, negotiates interception
//! mode, then exchanges one code and one reply at a time.
//!
//! Supports:
//! - Handshake with version reporting
//! - Blocking receive of intercepted codes
//! - Resolve/ignore replies

use super::protocol::{
    BaseResponse, InterceptInitMessage, InterceptionMode, InterceptionReply, ServerInitMessage,
    PROTOCOL_VERSION,
};
use objectskipper_core::{Code, ConnectionError, InterceptConnection, ResolveResult, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{BufRead, BufReader, Write};
use std::net::Shutdown;
use std::os::unix::net::UnixStream;
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// Interception connection over a Unix domain socket
#[derive(Debug)]
pub struct SocketInterceptConnection {
    reader: BufReader<UnixStream>,
    writer: UnixStream,
    server_version: u32,
    connection_id: u32,
    line: String,
}

impl SocketInterceptConnection {
    /// Connect to `path` and enter interception mode
    pub fn connect(path: impl AsRef<Path>, mode: InterceptionMode) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Connecting to command interpreter");
        let stream = UnixStream::connect(path)?;
        Self::from_stream(stream, mode)
    }

    /// Perform the interception handshake on an already connected stream
    pub fn from_stream(stream: UnixStream, mode: InterceptionMode) -> Result<Self> {
        let writer = stream.try_clone()?;
        let mut connection = Self {
            reader: BufReader::new(stream),
            writer,
            server_version: 0,
            connection_id: 0,
            line: String::new(),
        };

        let init: ServerInitMessage = connection.read_message()?;
        if init.version < PROTOCOL_VERSION {
            warn!(
                server = init.version,
                client = PROTOCOL_VERSION,
                "Server speaks an older protocol version"
            );
        }
        connection.server_version = init.version;
        connection.connection_id = init.id;

        connection.write_message(&InterceptInitMessage::new(mode))?;
        let response: BaseResponse = connection.read_message()?;
        if !response.success {
            return Err(ConnectionError::HandshakeRejected {
                error_type: response.error_type.unwrap_or_default(),
                message: response.error_message.unwrap_or_default(),
            });
        }

        info!(
            id = connection.connection_id,
            version = connection.server_version,
            mode = %mode,
            "Interception connection established"
        );
        Ok(connection)
    }

    /// Protocol version reported by the server
    pub fn server_version(&self) -> u32 {
        self.server_version
    }

    /// Connection id assigned by the server
    pub fn connection_id(&self) -> u32 {
        self.connection_id
    }

    /// Handle that can close this connection from another thread
    ///
    /// Closing unblocks a pending [`InterceptConnection::receive_code`],
    /// which then reports [`ConnectionError::Disconnected`].
    pub fn shutdown_handle(&self) -> Result<ShutdownHandle> {
        Ok(ShutdownHandle {
            stream: self.writer.try_clone()?,
        })
    }

    fn read_message<T: DeserializeOwned>(&mut self) -> Result<T> {
        loop {
            self.line.clear();
            let read = self.reader.read_line(&mut self.line)?;
            if read == 0 {
                return Err(ConnectionError::Disconnected);
            }
            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }
            trace!(message = trimmed, "Received");
            return Ok(serde_json::from_str(trimmed)?);
        }
    }

    fn write_message<T: Serialize>(&mut self, message: &T) -> Result<()> {
        let mut json = serde_json::to_vec(message)?;
        json.push(b'\n');
        self.writer.write_all(&json)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Closes a [`SocketInterceptConnection`] from outside the processing loop
#[derive(Debug)]
pub struct ShutdownHandle {
    stream: UnixStream,
}

impl ShutdownHandle {
    /// Shut down both directions of the socket
    pub fn shutdown(&self) -> Result<()> {
        match self.stream.shutdown(Shutdown::Both) {
            Err(e) if e.kind() != std::io::ErrorKind::NotConnected => Err(e.into()),
            _ => Ok(()),
        }
    }
}

impl InterceptConnection for SocketInterceptConnection {
    fn receive_code(&mut self) -> Result<Code> {
        self.read_message()
    }

    fn resolve_code(&mut self, result: ResolveResult, message: &str) -> Result<()> {
        self.write_message(&InterceptionReply::Resolve {
            result,
            content: message.to_string(),
        })
    }

    fn ignore_code(&mut self) -> Result<()> {
        self.write_message(&InterceptionReply::Ignore)
    }
}
