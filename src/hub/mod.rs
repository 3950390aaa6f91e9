//! Connection lifecycle handling on top of the [`Registry`]. The
//! abstract hub is transport-neutral; the submodules bind it to plain
//! websockets, axum routers and in-process channels.


pub mod axum;
pub mod mpsc;
pub mod ws;

use crate::connection::{SinkAdapter, StreamAdapter};
use crate::error::FrameError;
use crate::participant::Participant;
use crate::registry::Registry;
use crate::response::ServerEvent;
use crate::utils::get_id;

pub struct AbstractHub<S: SinkAdapter + Unpin> {
    pub registry: Registry<S>,
}

impl<S: SinkAdapter + Unpin> AbstractHub<S> {
    pub fn new() -> Self {
        AbstractHub {
            registry: Registry::new(),
        }
    }

    /// Drives one connection for its whole lifetime: allocates the
    /// participant id, registers the sink, pumps decoded messages into
    /// the registry and tears everything down when the stream ends.
    ///
    /// A [`FrameError`] from the stream is answered with an `error`
    /// event and the loop keeps serving; any other stream error ends
    /// the connection and counts as leaving the room.
    pub async fn handle_stream<W>(&self, stream: &mut W, sink: S)
    where
        W: StreamAdapter + Send,
    {
        let participant_id = get_id();
        let participant = Participant::new(
            participant_id,
            None,
            format!("Player{}", participant_id),
            String::new(),
        );
        self.registry
            .add_participant_connection(participant, sink)
            .await;

        loop {
            match stream.next().await {
                Ok(message) => {
                    self.registry.process_event(participant_id, message).await;
                }
                Err(error) => {
                    if let Some(frame_error) = error.downcast_ref::<FrameError>() {
                        tracing::warn!(
                            participant = participant_id,
                            %frame_error,
                            "dropping malformed frame"
                        );
                        self.registry
                            .send_to(
                                participant_id,
                                ServerEvent::Error {
                                    message: frame_error.to_string(),
                                },
                            )
                            .await;
                        continue;
                    }
                    tracing::debug!(participant = participant_id, %error, "stream ended");
                    break;
                }
            }
        }

        self.registry.handle_leave(participant_id).await;
        self.registry
            .remove_participant_connection(participant_id)
            .await;
    }
}

impl<S: SinkAdapter + Unpin> Default for AbstractHub<S> {
    fn default() -> Self {
        Self::new()
    }
}
