
use crate::connection::{SinkAdapter, StreamAdapter};
use crate::hub::AbstractHub;
use crate::message::ClientMessage;
use crate::response::ServerEvent;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::io;
use tokio::sync::mpsc::{self, Receiver, Sender};

/// An implementation of [`SinkAdapter`] that sends events over a `tokio::sync::mpsc::Sender`.
#[derive(Clone)]
pub struct MpscSink {
    sender: Sender<ServerEvent>,
}

#[async_trait]
impl SinkAdapter for MpscSink {
    async fn send(
        &mut self,
        event: ServerEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.sender.send(event).await.map_err(|e| {
            Box::new(io::Error::new(
                io::ErrorKind::BrokenPipe,
                format!("Failed to send event: {}", e),
            )) as _
        })
    }
}

/// An implementation of [`StreamAdapter`] that receives messages from a `tokio::sync::mpsc::Receiver`.
pub struct MpscStream {
    receiver: Receiver<ClientMessage>,
}

#[async_trait]
impl StreamAdapter for MpscStream {
    async fn next(&mut self) -> Result<ClientMessage, Box<dyn std::error::Error + Send + Sync>> {
        self.receiver.recv().await.ok_or_else(|| {
            Box::new(io::Error::new(io::ErrorKind::BrokenPipe, "Channel closed")) as _
        })
    }
}

/// A typing duel hub that uses Tokio MPSC channels for communication.
///
/// This allows participants to join rooms and race by sending
/// [`ClientMessage`]s and receiving [`ServerEvent`]s through channels,
/// without involving networking. Useful for testing or embedding the
/// room logic within a single process, for example to drive a local
/// bot opponent.
pub struct MpscHub {
    hub: Arc<AbstractHub<MpscSink>>,
}

impl MpscHub {
    /// Creates a new `MpscHub`.
    pub fn new() -> Self {
        MpscHub {
            hub: Arc::new(AbstractHub::new()),
        }
    }

    /// Shared handle to the underlying hub.
    pub fn hub(&self) -> Arc<AbstractHub<MpscSink>> {
        self.hub.clone()
    }

    /// Connects a new participant via MPSC channels.
    ///
    /// Creates a pair of channels: one for the participant to send
    /// messages (`Sender<ClientMessage>`) and one for it to receive
    /// events (`Receiver<ServerEvent>`).
    ///
    /// A background task is spawned to handle the communication between
    /// these channels and the underlying [`AbstractHub`]. Dropping the
    /// sender closes the channel and counts as the participant
    /// disconnecting.
    ///
    /// # Arguments
    /// * `buffer_size` - The buffer size for the created MPSC channels.
    ///
    /// # Returns
    /// A tuple containing the sender for client messages and the receiver for server events.
    pub fn connect(&self, buffer_size: usize) -> (Sender<ClientMessage>, Receiver<ServerEvent>) {
        let (message_tx, message_rx) = mpsc::channel(buffer_size);
        let (event_tx, event_rx) = mpsc::channel(buffer_size);

        let hub = self.hub.clone();

        tokio::spawn(async move {
            let mut stream = MpscStream {
                receiver: message_rx,
            };
            let sink = MpscSink { sender: event_tx };

            hub.handle_stream(&mut stream, sink).await;
        });

        (message_tx, event_rx)
    }
}

impl Default for MpscHub {
    fn default() -> Self {
        Self::new()
    }
}
