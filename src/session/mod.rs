//! Per-participant test state machines. All three variants drive the
//! same [`metrics`](crate::metrics) engine through one [`TestMode`]
//! seam; the host feeds them input events and a shared 1 Hz tick and
//! owns no timers beyond that.


pub mod song;
pub mod timed;
pub mod versus;

pub use song::SongTest;
pub use timed::{TimedTest, DURATION_PRESETS};
pub use versus::{VersusPhase, VersusTest};

use crate::metrics::{self, Combo, MetricsSnapshot};
use std::time::{Duration, Instant};

/// Everything a test can react to. `Input` always carries the full
/// current text, never a delta, so stale events overwrite cleanly.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The participant's input field changed to this exact text.
    Input(String),
    /// One second of wall-clock time passed. Supplied by the host's
    /// scheduler; modes without a countdown ignore it.
    Tick,
    /// The host track reached this playback position (song mode).
    Playback(Duration),
}

/// Uniform surface over the test variants.
pub trait TestMode {
    fn advance(&mut self, event: SessionEvent);
    fn snapshot(&self) -> MetricsSnapshot;
    fn is_finished(&self) -> bool;
}

/// The scoring core shared by the timed and versus variants: one
/// target text, the latest typed text, and the counters derived from
/// comparing them positionally.
#[derive(Debug, Clone)]
pub struct SessionState {
    target: String,
    typed: String,
    correct_chars: usize,
    total_chars: usize,
    combo: Combo,
    started_at: Option<Instant>,
    finished: bool,
}

impl SessionState {
    pub fn new(target: impl Into<String>) -> Self {
        SessionState {
            target: target.into(),
            typed: String::new(),
            correct_chars: 0,
            total_chars: 0,
            combo: Combo::default(),
            started_at: None,
            finished: false,
        }
    }

    /// Applies one input event. The clock starts on the first
    /// non-empty keystroke; the combo grows only while the typed text
    /// remains a fully correct, longer prefix of the target; typing
    /// the whole target finishes the session.
    pub fn write(&mut self, value: &str) {
        if self.finished {
            return;
        }
        if self.started_at.is_none() && !value.is_empty() {
            self.started_at = Some(Instant::now());
        }

        let previous_len = self.typed.chars().count();
        let len = value.chars().count();
        let correct = metrics::correct_chars(value, &self.target);

        if correct == len && len > previous_len {
            self.combo.increment();
        } else {
            self.combo.reset();
        }

        self.correct_chars = correct;
        self.total_chars = len;
        self.typed.clear();
        self.typed.push_str(value);

        if value == self.target {
            self.finished = true;
        }
    }

    /// Marks the session finished regardless of text state, used by
    /// countdown expiry.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Clears everything except the target, returning the session to
    /// idle. A rematch `start` goes through here.
    pub fn reset(&mut self) {
        self.typed.clear();
        self.correct_chars = 0;
        self.total_chars = 0;
        self.combo = Combo::default();
        self.started_at = None;
        self.finished = false;
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn correct_chars(&self) -> usize {
        self.correct_chars
    }

    pub fn total_chars(&self) -> usize {
        self.total_chars
    }

    pub fn accuracy(&self) -> u32 {
        metrics::accuracy(&self.typed, &self.target)
    }

    pub fn combo(&self) -> &Combo {
        &self.combo
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map(|at| at.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    pub fn wpm(&self) -> u32 {
        metrics::wpm(self.correct_chars, self.elapsed())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn snapshot(&self, sync_score: u32) -> MetricsSnapshot {
        MetricsSnapshot {
            wpm: self.wpm(),
            accuracy: self.accuracy(),
            combo: self.combo.streak(),
            max_combo: self.combo.best(),
            correct_chars: self.correct_chars,
            total_chars: self.total_chars,
            sync_score,
        }
    }
}
