
use crate::message::ClientMessage;
use crate::response::ServerEvent;
use async_trait::async_trait;

/// Outbound half of a participant's connection. Any channel that can
/// deliver a [`ServerEvent`] satisfies the registry.
#[async_trait]
pub trait SinkAdapter {
    async fn send(
        &mut self,
        event: ServerEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Inbound half of a participant's connection. An `Err` carrying a
/// [`FrameError`](crate::error::FrameError) marks one undecodable
/// frame; any other `Err` ends the connection's read loop.
#[async_trait]
pub trait StreamAdapter {
    async fn next(&mut self) -> Result<ClientMessage, Box<dyn std::error::Error + Send + Sync>>;
}
