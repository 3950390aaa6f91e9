mod test;

use serde::{Deserialize, Serialize};

/// Request methods a participant can send to the hub.
///
/// The wire tags are lowercase verbs; every room-scoped method names
/// its room explicitly rather than relying on connection state, so a
/// relay can be routed from the payload alone.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ClientMethod {
    /// Enter the named room, creating it on first join (triggers a
    /// `joined` event, and `start` once the room is paired).
    Join { room: String },
    /// Mirror the sender's full typed text to the other member
    /// (triggers `opponent-progress` on their side).
    Progress { room: String, text: String },
    /// Announce local completion (triggers `opponent-finished`).
    Finished { room: String },
    /// Leave the current room without closing the connection.
    Leave,
}

/// Envelope for every client-originated frame.
///
/// # examples
///
/// ```rust
/// use typebeat::message::{ClientMessage, ClientMethod};
///
/// let message = ClientMessage::new(
///     ClientMethod::Join {
///         room: "duel-1".to_string(),
///     },
///     String::new(),
/// );
///
/// let json = serde_json::to_string(&message).unwrap();
/// let parsed: ClientMessage = serde_json::from_str(&json).unwrap();
/// ```
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClientMessage {
    /// The method carried by this frame.
    pub message: ClientMethod,
    /// Opaque token identifying the sender to the identity
    /// collaborator. The core never interprets it.
    pub client_token: String,
}

impl ClientMessage {
    pub fn new(message: ClientMethod, client_token: String) -> Self {
        ClientMessage {
            message,
            client_token,
        }
    }
}
