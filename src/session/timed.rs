use crate::metrics::MetricsSnapshot;
use crate::session::{SessionEvent, SessionState, TestMode};

/// Countdown presets offered by the solo mode. `None` runs without a
/// timer and only completing the text ends the test.
pub const DURATION_PRESETS: [Option<u32>; 4] = [Some(15), Some(30), Some(60), None];

/// Solo timed test over a fixed prompt. The countdown arms on the
/// first keystroke, not on construction, so an idle participant never
/// loses time.
#[derive(Debug, Clone)]
pub struct TimedTest {
    state: SessionState,
    seconds_remaining: Option<u32>,
}

impl TimedTest {
    pub fn new(target: impl Into<String>, duration_secs: Option<u32>) -> Self {
        TimedTest {
            state: SessionState::new(target),
            seconds_remaining: duration_secs,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Seconds left on the countdown, `None` in unlimited mode.
    pub fn seconds_remaining(&self) -> Option<u32> {
        self.seconds_remaining
    }
}

impl TestMode for TimedTest {
    fn advance(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Input(value) => self.state.write(&value),
            SessionEvent::Tick => {
                if self.state.started_at().is_none() || self.state.is_finished() {
                    return;
                }
                if let Some(remaining) = self.seconds_remaining.as_mut() {
                    *remaining = remaining.saturating_sub(1);
                    if *remaining == 0 {
                        self.state.finish();
                    }
                }
            }
            SessionEvent::Playback(_) => {}
        }
    }

    fn snapshot(&self) -> MetricsSnapshot {
        self.state.snapshot(100)
    }

    fn is_finished(&self) -> bool {
        self.state.is_finished()
    }
}
