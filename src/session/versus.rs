use crate::message::ClientMethod;
use crate::metrics::{self, MetricsSnapshot};
use crate::response::ServerEvent;
use crate::session::{SessionEvent, SessionState, TestMode};

/// Countdown used when a duel does not specify its own.
pub const DEFAULT_DURATION_SECS: u32 = 60;

/// Where a duel participant currently stands. A participant re-enters
/// `WaitingForOpponent` whenever the opponent drops, so a finished
/// phase is not necessarily terminal for the room, only for the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersusPhase {
    WaitingForOpponent,
    Active,
    Finished,
}

/// One side of a head-to-head race. The struct is transport-agnostic:
/// server events are fed in through [`apply`](VersusTest::apply) and
/// the messages it wants delivered accumulate in an outbox the
/// embedder drains with [`take_outbox`](VersusTest::take_outbox).
#[derive(Debug, Clone)]
pub struct VersusTest {
    room: String,
    duration_secs: u32,
    state: SessionState,
    phase: VersusPhase,
    seconds_remaining: u32,
    opponent_id: Option<u64>,
    opponent_text: String,
    opponent_correct: usize,
    opponent_finished: bool,
    outbox: Vec<ClientMethod>,
}

impl VersusTest {
    /// Creates a duel session and queues the join announcement for the
    /// given room.
    pub fn new(room: impl Into<String>, target: impl Into<String>, duration_secs: u32) -> Self {
        let room = room.into();
        let outbox = vec![ClientMethod::Join { room: room.clone() }];
        VersusTest {
            room,
            duration_secs,
            state: SessionState::new(target),
            phase: VersusPhase::WaitingForOpponent,
            seconds_remaining: duration_secs,
            opponent_id: None,
            opponent_text: String::new(),
            opponent_correct: 0,
            opponent_finished: false,
            outbox,
        }
    }

    /// Digests one event from the room. `start` arms a fresh race even
    /// after a previous one finished, which is how rematches against a
    /// replacement opponent work.
    pub fn apply(&mut self, event: &ServerEvent) {
        match event {
            ServerEvent::Joined {
                waiting,
                opponent_id,
            } => {
                if !waiting {
                    self.opponent_id = *opponent_id;
                }
            }
            ServerEvent::Start => {
                self.state.reset();
                self.seconds_remaining = self.duration_secs;
                self.opponent_text.clear();
                self.opponent_correct = 0;
                self.opponent_finished = false;
                self.phase = VersusPhase::Active;
            }
            ServerEvent::OpponentProgress { text } => {
                // Progress from a not-yet-started race is stale, drop it.
                if self.phase == VersusPhase::WaitingForOpponent {
                    return;
                }
                self.opponent_text.clear();
                self.opponent_text.push_str(text);
                self.opponent_correct = metrics::correct_chars(text, self.state.target());
            }
            ServerEvent::OpponentFinished => {
                self.opponent_finished = true;
            }
            ServerEvent::OpponentLeft => {
                self.opponent_id = None;
                self.phase = VersusPhase::WaitingForOpponent;
            }
            ServerEvent::RoomFull { .. } | ServerEvent::Error { .. } => {}
        }
    }

    /// Messages queued since the last drain, in emission order.
    pub fn take_outbox(&mut self) -> Vec<ClientMethod> {
        std::mem::take(&mut self.outbox)
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn phase(&self) -> VersusPhase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn opponent_id(&self) -> Option<u64> {
        self.opponent_id
    }

    pub fn opponent_text(&self) -> &str {
        &self.opponent_text
    }

    pub fn opponent_correct_chars(&self) -> usize {
        self.opponent_correct
    }

    /// Opponent accuracy, measured against this participant's own
    /// target text.
    pub fn opponent_accuracy(&self) -> u32 {
        metrics::accuracy(&self.opponent_text, self.state.target())
    }

    pub fn is_opponent_finished(&self) -> bool {
        self.opponent_finished
    }

    fn finish(&mut self) {
        self.state.finish();
        self.phase = VersusPhase::Finished;
        self.outbox.push(ClientMethod::Finished {
            room: self.room.clone(),
        });
    }
}

impl TestMode for VersusTest {
    fn advance(&mut self, event: SessionEvent) {
        if self.phase != VersusPhase::Active {
            return;
        }
        match event {
            SessionEvent::Input(value) => {
                self.state.write(&value);
                self.outbox.push(ClientMethod::Progress {
                    room: self.room.clone(),
                    text: value,
                });
                if self.state.is_finished() {
                    self.finish();
                }
            }
            SessionEvent::Tick => {
                self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
                if self.seconds_remaining == 0 {
                    self.finish();
                }
            }
            SessionEvent::Playback(_) => {}
        }
    }

    fn snapshot(&self) -> MetricsSnapshot {
        self.state.snapshot(100)
    }

    fn is_finished(&self) -> bool {
        self.phase == VersusPhase::Finished
    }
}
