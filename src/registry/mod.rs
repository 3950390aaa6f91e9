//! Room bookkeeping and event fan-out. The registry owns the three
//! authoritative maps (participants, rooms, connections) and is the
//! only place room membership changes; transports hand it decoded
//! messages and it pushes [`ServerEvent`]s back through the stored
//! sinks.


use crate::connection::SinkAdapter;
use crate::message::{ClientMessage, ClientMethod};
use crate::participant::Participant;
use crate::response::ServerEvent;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Hard cap on room occupancy. Matchmaking is pairwise; a third join
/// is rejected, never queued.
pub const ROOM_CAPACITY: usize = 2;

/// A named duel room. Rooms hold ids only; the participants themselves
/// live in the registry map.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    pub members: Vec<u64>,
    pub created_at: Instant,
}

impl Room {
    pub fn new(id: impl Into<String>) -> Self {
        Room {
            id: id.into(),
            members: Vec::with_capacity(ROOM_CAPACITY),
            created_at: Instant::now(),
        }
    }

    pub fn has_member(&self, participant_id: u64) -> bool {
        self.members.contains(&participant_id)
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= ROOM_CAPACITY
    }

    /// The other member of the pair, if one is present.
    pub fn opponent_of(&self, participant_id: u64) -> Option<u64> {
        self.members
            .iter()
            .copied()
            .find(|id| *id != participant_id)
    }
}

enum JoinOutcome {
    Full,
    Waiting,
    Paired { first: u64 },
    Rejoined { opponent: Option<u64> },
}

pub struct Registry<S: SinkAdapter + Unpin> {
    participants: Arc<Mutex<HashMap<u64, Participant>>>,
    rooms: Arc<Mutex<HashMap<String, Room>>>,
    connections: Arc<Mutex<HashMap<u64, S>>>,
}

impl<S: SinkAdapter + Unpin> Clone for Registry<S> {
    fn clone(&self) -> Self {
        Registry {
            participants: self.participants.clone(),
            rooms: self.rooms.clone(),
            connections: self.connections.clone(),
        }
    }
}

impl<S: SinkAdapter + Unpin> Registry<S> {
    pub fn new() -> Self {
        Registry {
            participants: Arc::new(Mutex::new(HashMap::new())),
            rooms: Arc::new(Mutex::new(HashMap::new())),
            connections: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn get_participants(&self) -> Arc<Mutex<HashMap<u64, Participant>>> {
        self.participants.clone()
    }

    pub fn get_rooms(&self) -> Arc<Mutex<HashMap<String, Room>>> {
        self.rooms.clone()
    }

    pub fn get_connections(&self) -> Arc<Mutex<HashMap<u64, S>>> {
        self.connections.clone()
    }

    pub async fn add_participant_connection(&self, participant: Participant, connection: S) {
        let participant_id = participant.id;
        self.participants
            .lock()
            .await
            .insert(participant_id, participant);
        self.connections
            .lock()
            .await
            .insert(participant_id, connection);
        tracing::info!(participant = participant_id, "participant connected");
    }

    pub async fn remove_participant_connection(&self, participant_id: u64) {
        self.participants.lock().await.remove(&participant_id);
        self.connections.lock().await.remove(&participant_id);
        tracing::info!(participant = participant_id, "participant disconnected");
    }

    /// Pushes one event to one participant. Delivery failures are
    /// logged and swallowed; the read loop owns connection teardown.
    pub async fn send_to(&self, participant_id: u64, event: ServerEvent) {
        let mut connections = self.connections.lock().await;
        if let Some(connection) = connections.get_mut(&participant_id) {
            if let Err(error) = connection.send(event).await {
                tracing::warn!(participant = participant_id, %error, "failed to push event");
            }
        }
    }

    /// Joins a participant into the named room, creating it on first
    /// use. The first member waits; the second completes the pair and
    /// both receive `start` before the joiner learns who it is paired
    /// with. A third participant is turned away with `room-full` and
    /// the room is left untouched.
    pub async fn handle_join(&self, participant_id: u64, room_id: &str) {
        let previous = {
            let participants = self.participants.lock().await;
            participants
                .get(&participant_id)
                .and_then(|participant| participant.room.clone())
        };
        // Switching rooms implies leaving the old one first.
        if previous.as_deref().is_some_and(|id| id != room_id) {
            self.handle_leave(participant_id).await;
        }

        let outcome = {
            let mut rooms = self.rooms.lock().await;
            let room = rooms
                .entry(room_id.to_string())
                .or_insert_with(|| Room::new(room_id));

            if room.has_member(participant_id) {
                JoinOutcome::Rejoined {
                    opponent: room.opponent_of(participant_id),
                }
            } else if room.is_full() {
                JoinOutcome::Full
            } else {
                room.members.push(participant_id);
                match room.opponent_of(participant_id) {
                    Some(first) => JoinOutcome::Paired { first },
                    None => JoinOutcome::Waiting,
                }
            }
        };

        if !matches!(outcome, JoinOutcome::Full) {
            let mut participants = self.participants.lock().await;
            if let Some(participant) = participants.get_mut(&participant_id) {
                participant.room = Some(room_id.to_string());
            }
        }

        match outcome {
            JoinOutcome::Full => {
                tracing::info!(room = room_id, participant = participant_id, "room full");
                self.send_to(
                    participant_id,
                    ServerEvent::RoomFull {
                        room: room_id.to_string(),
                    },
                )
                .await;
            }
            JoinOutcome::Waiting => {
                tracing::info!(room = room_id, participant = participant_id, "waiting for opponent");
                self.send_to(
                    participant_id,
                    ServerEvent::Joined {
                        waiting: true,
                        opponent_id: None,
                    },
                )
                .await;
            }
            JoinOutcome::Paired { first } => {
                tracing::info!(room = room_id, first, second = participant_id, "room paired");
                self.send_to(
                    first,
                    ServerEvent::Joined {
                        waiting: false,
                        opponent_id: Some(participant_id),
                    },
                )
                .await;
                self.send_to(first, ServerEvent::Start).await;
                self.send_to(participant_id, ServerEvent::Start).await;
                self.send_to(
                    participant_id,
                    ServerEvent::Joined {
                        waiting: false,
                        opponent_id: Some(first),
                    },
                )
                .await;
            }
            JoinOutcome::Rejoined { opponent } => {
                self.send_to(
                    participant_id,
                    ServerEvent::Joined {
                        waiting: opponent.is_none(),
                        opponent_id: opponent,
                    },
                )
                .await;
            }
        }
    }

    /// Removes a participant from its room. The survivor is told the
    /// opponent left and stays in the room waiting; an emptied room is
    /// deleted.
    pub async fn handle_leave(&self, participant_id: u64) {
        let room_id = {
            let mut participants = self.participants.lock().await;
            participants
                .get_mut(&participant_id)
                .and_then(|participant| participant.room.take())
        };
        let Some(room_id) = room_id else {
            return;
        };

        let survivor = {
            let mut rooms = self.rooms.lock().await;
            let remaining = rooms.get_mut(&room_id).map(|room| {
                room.members.retain(|id| *id != participant_id);
                room.members.first().copied()
            });
            match remaining {
                None => None,
                Some(None) => {
                    rooms.remove(&room_id);
                    tracing::info!(room = %room_id, "room closed");
                    None
                }
                Some(Some(survivor)) => Some(survivor),
            }
        };

        if let Some(survivor) = survivor {
            self.send_to(survivor, ServerEvent::OpponentLeft).await;
        }
    }

    /// Fans an event out to every room member except the sender. The
    /// sender must be a member; anything else is dropped.
    pub async fn handle_relay(&self, sender_id: u64, room_id: &str, event: ServerEvent) {
        let targets: Vec<u64> = {
            let rooms = self.rooms.lock().await;
            match rooms.get(room_id) {
                Some(room) if room.has_member(sender_id) => room
                    .members
                    .iter()
                    .copied()
                    .filter(|id| *id != sender_id)
                    .collect(),
                _ => {
                    tracing::warn!(
                        room = room_id,
                        participant = sender_id,
                        "relay from outside the room dropped"
                    );
                    return;
                }
            }
        };

        for target in targets {
            self.send_to(target, event.clone()).await;
        }
    }

    pub async fn process_event(&self, participant_id: u64, message: ClientMessage) {
        match message.message {
            ClientMethod::Join { room } => self.handle_join(participant_id, &room).await,
            ClientMethod::Progress { room, text } => {
                self.handle_relay(participant_id, &room, ServerEvent::OpponentProgress { text })
                    .await
            }
            ClientMethod::Finished { room } => {
                self.handle_relay(participant_id, &room, ServerEvent::OpponentFinished)
                    .await
            }
            ClientMethod::Leave => self.handle_leave(participant_id).await,
        }
    }
}

impl<S: SinkAdapter + Unpin> Default for Registry<S> {
    fn default() -> Self {
        Self::new()
    }
}
