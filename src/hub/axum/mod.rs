
use crate::connection::{SinkAdapter, StreamAdapter};
use crate::error::FrameError;
use crate::hub::AbstractHub;
use crate::message::ClientMessage;
use crate::response::ServerEvent;
use async_trait::async_trait;
use axum::extract::ws::{Message, Utf8Bytes, WebSocket};
use axum::extract::WebSocketUpgrade;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::io;

pub struct AxumWsSink {
    sink: SplitSink<WebSocket, Message>,
}

#[async_trait]
impl SinkAdapter for AxumWsSink {
    async fn send(
        &mut self,
        event: ServerEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let message = Message::Text(Utf8Bytes::from(serde_json::to_string(&event)?));
        self.sink.send(message).await.map_err(|e| Box::new(e) as _)
    }
}

pub struct AxumWsStream {
    stream: SplitStream<WebSocket>,
}

#[async_trait]
impl StreamAdapter for AxumWsStream {
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

/// Mounts the hub on an axum router so duels can share a server with
/// ordinary HTTP routes. The caller owns the listener and
/// `axum::serve` call.
pub struct AxumWsHub {
    hub: Arc<AbstractHub<AxumWsSink>>,
}

impl AxumWsHub {
    pub fn new() -> Self {
        AxumWsHub {
            hub: Arc::new(AbstractHub::new()),
        }
    }

    pub fn hub(&self) -> Arc<AbstractHub<AxumWsSink>> {
        self.hub.clone()
    }

    pub async fn ws_handler(
        ws: WebSocketUpgrade,
        hub: Arc<AbstractHub<AxumWsSink>>,
    ) -> impl IntoResponse {
        ws.on_upgrade(|socket| async move {
            let (sink, stream) = socket.split();

            let mut stream_adapter = AxumWsStream { stream };
            let sink_adapter = AxumWsSink { sink };

            hub.handle_stream(&mut stream_adapter, sink_adapter).await;
        })
    }

    /// Registers the websocket endpoint on `path` and returns the
    /// extended router.
    pub fn attach_router(&self, path: &str, router: Router) -> Router {
        let hub = self.hub.clone();
        router.route(path, get(move |ws| AxumWsHub::ws_handler(ws, hub)))
    }
}

impl Default for AxumWsHub {
    fn default() -> Self {
        Self::new()
    }
}
