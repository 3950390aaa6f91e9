mod test;

use crate::connection::{SinkAdapter, StreamAdapter};
use crate::error::{FrameError, HubError};
use crate::hub::AbstractHub;
use crate::message::ClientMessage;
use crate::response::ServerEvent;
use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{accept_async, WebSocketStream};
use tungstenite::{Message, Utf8Bytes};

pub struct WsSink {
    sink: SplitSink<WebSocketStream<TcpStream>, Message>,
}

#[async_trait]
impl SinkAdapter for WsSink {
    async fn send(
        &mut self,
        event: ServerEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let message = Message::Text(Utf8Bytes::from(serde_json::to_string(&event)?));
        self.sink.send(message).await.map_err(|e| Box::new(e) as _)
    }
}

pub struct WsStream {
    stream: SplitStream<WebSocketStream<TcpStream>>,
}

#[async_trait]
impl StreamAdapter for WsStream {
    async fn next(&mut self) -> Result<ClientMessage, Box<dyn std::error::Error + Send + Sync>> {
        let message = match self.stream.next().await {
            Some(message) => message?,
            None => {
                return Err(Box::new(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "connection closed",
                )))
            }
        };
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => {
                return Err(Box::new(io::Error::new(
                    io::ErrorKind::ConnectionAborted,
                    "close frame",
                )))
            }
            _ => return Err(Box::new(FrameError::new("non-text frame"))),
        };
        let message = serde_json::from_slice(text.as_ref())
            .map_err(|error| FrameError::new(error.to_string()))?;
        Ok(message)
    }
}

/// Standalone websocket server around an [`AbstractHub`]. Binds a TCP
/// listener and spawns one worker task per accepted connection.
pub struct WebsocketHub {
    hub: Arc<AbstractHub<WsSink>>,
    tcp_listener: Option<TcpListener>,
}

impl WebsocketHub {
    pub fn new() -> Self {
        WebsocketHub {
            hub: Arc::new(AbstractHub::new()),
            tcp_listener: None,
        }
    }

    /// Shared handle to the hub, for inspecting rooms or embedding the
    /// server next to other tasks.
    pub fn hub(&self) -> Arc<AbstractHub<WsSink>> {
        self.hub.clone()
    }

    pub fn bind_listener(&mut self, listener: TcpListener) {
        self.tcp_listener = Some(listener);
    }

    pub async fn bind_addr(&mut self, addr: &str) -> Result<(), HubError> {
        let tcp_listener = TcpListener::bind(addr).await?;
        self.tcp_listener = Some(tcp_listener);
        Ok(())
    }

    /// The address the listener actually bound, useful with port 0.
    pub fn local_addr(&self) -> Result<SocketAddr, HubError> {
        match &self.tcp_listener {
            Some(listener) => Ok(listener.local_addr()?),
            None => Err(HubError::NotBound),
        }
    }

    /// Accept loop. Runs until the listener fails; requires a prior
    /// bind.
    pub async fn listen(&mut self) -> Result<(), HubError> {
        let listener = self.tcp_listener.as_ref().ok_or(HubError::NotBound)?;
        loop {
            let (stream, _) = listener.accept().await?;
            tokio::spawn(Self::stream_worker(stream, self.hub.clone()));
        }
    }

    async fn stream_worker(stream: TcpStream, hub: Arc<AbstractHub<WsSink>>) {
        let websocket = match accept_async(stream).await {
            Ok(websocket) => websocket,
            Err(error) => {
                tracing::warn!(%error, "websocket handshake failed");
                return;
            }
        };
        let (sink, stream) = websocket.split();

        let mut stream_adapter = WsStream { stream };
        let sink_adapter = WsSink { sink };

        hub.handle_stream(&mut stream_adapter, sink_adapter).await;
    }
}

impl Default for WebsocketHub {
    fn default() -> Self {
        Self::new()
    }
}
