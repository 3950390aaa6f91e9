mod test;

use serde::{Deserialize, Serialize};

/// Server-to-client events. Tags are the kebab-case event names the
/// front-end listens for; payload-free events carry no `data` key.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Pairing state after a `join`: `waiting` until a second member
    /// arrives, then the opponent's connection id.
    #[serde(rename_all = "camelCase")]
    Joined {
        waiting: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        opponent_id: Option<u64>,
    },
    /// Both members are present; sessions flip to active on receipt.
    Start,
    /// The opponent's full typed text, latest write wins.
    OpponentProgress { text: String },
    /// The opponent completed their test. Display-only; the local
    /// session keeps running.
    OpponentFinished,
    /// The opponent left the room; the receiver is waiting again.
    OpponentLeft,
    /// The named room already holds two members; the join was refused.
    RoomFull { room: String },
    /// A frame could not be decoded. Informational, never fatal.
    Error { message: String },
}
