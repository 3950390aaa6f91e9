//! Pure scoring functions shared by every test mode: positional
//! accuracy, words-per-minute, combo bookkeeping and the beat-sync
//! score. Nothing here holds state beyond [`Combo`]; sessions call in
//! on every input event and once per timer tick.

mod test;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Counts positions where the typed character equals the target
/// character at the same index. Comparison is strictly positional;
/// an inserted character misaligns the whole tail and that is the
/// intended scoring behavior, not a defect.
pub fn correct_chars(typed: &str, target: &str) -> usize {
    typed
        .chars()
        .zip(target.chars())
        .filter(|(a, b)| a == b)
        .count()
}

/// Percentage of typed characters that sit on the right position,
/// rounded to the nearest integer. Empty input scores 100.
pub fn accuracy(typed: &str, target: &str) -> u32 {
    let len = typed.chars().count();
    if len == 0 {
        return 100;
    }
    (correct_chars(typed, target) as f64 / len as f64 * 100.0).round() as u32
}

/// Words per minute at five characters per word, counting correct
/// characters only. Non-positive or non-finite elapsed time yields 0.
pub fn wpm(correct_chars: usize, elapsed: Duration) -> u32 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes <= 0.0 {
        return 0;
    }
    let value = (correct_chars as f64 / 5.0 / minutes).round();
    if value.is_finite() {
        value as u32
    } else {
        0
    }
}

/// Samples how close `now_ms` lands to the midpoint between two beats:
/// 100 exactly on the half-beat, 0 on the beat boundary.
pub fn sync_sample(now_ms: u64, interval_ms: f64) -> u32 {
    if interval_ms <= 0.0 {
        return 0;
    }
    let frac = (now_ms as f64 % interval_ms) / interval_ms;
    ((1.0 - (0.5 - frac).abs() * 2.0) * 100.0).round() as u32
}

/// Folds a fresh sync sample into the running score. This is a
/// half-weight recurrence, not a true running average: the score is
/// always the rounded mean of the previous value and the new sample.
pub fn blend_sync(previous: u32, sample: u32) -> u32 {
    // rounds half up
    (previous + sample + 1) / 2
}

/// Consecutive-hit counter with its running maximum. The streak only
/// ever moves through [`Combo::increment`] and [`Combo::reset`]; the
/// maximum never decreases.
#[derive(Debug, Clone, Copy, Default)]
pub struct Combo {
    streak: u32,
    best: u32,
}

impl Combo {
    pub fn increment(&mut self) {
        self.streak += 1;
        self.best = self.best.max(self.streak);
    }

    pub fn reset(&mut self) {
        self.streak = 0;
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best(&self) -> u32 {
        self.best
    }
}

/// Derived per-session statistics, recomputed on every event and never
/// stored authoritatively anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub wpm: u32,
    pub accuracy: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub correct_chars: usize,
    pub total_chars: usize,
    pub sync_score: u32,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        MetricsSnapshot {
            wpm: 0,
            accuracy: 100,
            combo: 0,
            max_combo: 0,
            correct_chars: 0,
            total_chars: 0,
            sync_score: 100,
        }
    }
}
