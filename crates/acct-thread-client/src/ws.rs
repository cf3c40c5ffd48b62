use std::io::ErrorKind;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};

use crate::channel::MessageChannel;
use crate::config::{ClientConfig, Endpoint};
use crate::error::{ClientError, ClientResult};

/// WebSocket connection to a ledger server.
pub struct WsChannel {
    endpoint: Endpoint,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    closed: bool,
}

impl std::fmt::Debug for WsChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsChannel")
            .field("endpoint", &self.endpoint)
            .field("closed", &self.closed)
            .finish()
    }
}

impl WsChannel {
    pub async fn connect(config: &ClientConfig) -> ClientResult<Self> {
        let endpoint = config.endpoint.clone();
        let handshake = connect_async(endpoint.as_str());
        let result = match config.connect_timeout {
            None => handshake.await,
            Some(after) => tokio::time::timeout(after, handshake).await.map_err(|_| {
                ClientError::ConnectTimeout { endpoint: endpoint.to_string(), after }
            })?,
        };
        let (stream, response) = result.map_err(|e| connect_error(&endpoint, e))?;
        info!(endpoint = %endpoint, status = %response.status(), "connected to ledger server");
        Ok(Self { endpoint, stream, closed: false })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

fn connect_error(endpoint: &Endpoint, err: tungstenite::Error) -> ClientError {
    match err {
        tungstenite::Error::Io(io) if io.kind() == ErrorKind::ConnectionRefused => {
            ClientError::ConnectionRefused { endpoint: endpoint.to_string() }
        }
        other => ClientError::Unreachable {
            endpoint: endpoint.to_string(),
            reason: other.to_string(),
        },
    }
}

fn transport(err: tungstenite::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}

#[async_trait]
impl MessageChannel for WsChannel {
    async fn send_text(&mut self, text: String) -> ClientResult<()> {
        self.stream.send(Message::Text(text)).await.map_err(transport)
    }

    async fn recv_text(&mut self) -> ClientResult<Option<String>> {
        while let Some(message) = self.stream.next().await {
            match message.map_err(transport)? {
                Message::Text(text) => return Ok(Some(text)),
                Message::Ping(payload) => {
                    self.stream.send(Message::Pong(payload)).await.map_err(transport)?;
                }
                Message::Close(frame) => {
                    debug!(?frame, "server closed the connection");
                    return Ok(None);
                }
                Message::Binary(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }
        Ok(None)
    }

    async fn close(&mut self) -> ClientResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        match self.stream.close(None).await {
            Ok(()) | Err(tungstenite::Error::ConnectionClosed) | Err(tungstenite::Error::AlreadyClosed) => {
                info!(endpoint = %self.endpoint, "connection closed");
                Ok(())
            }
            Err(e) => Err(transport(e)),
        }
    }
}
