use std::time::Duration;

use acct_thread_protocol::{ProtocolError, RequestId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unable to open connection to {endpoint}: {reason}")]
    Unreachable { endpoint: String, reason: String },

    #[error("connection to {endpoint} refused")]
    ConnectionRefused { endpoint: String },

    #[error("timed out connecting to {endpoint} after {after:?}")]
    ConnectTimeout { endpoint: String, after: Duration },

    #[error("no response to request {id} after {after:?}")]
    ResponseTimeout { id: RequestId, after: Duration },

    #[error("channel closed while waiting for response to request {0}")]
    ChannelClosed(RequestId),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
