//! Beat timing for song mode: [`BeatClock`] maps a tempo to its beat
//! interval and samples keystroke timing against it, [`Song`] is the
//! immutable reference record a [`Catalog`] hands out.


use crate::metrics;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Stateless beat grid derived from a tempo. The clock never ticks on
/// its own; callers pass wall-clock milliseconds in.
#[derive(Debug, Clone, Copy)]
pub struct BeatClock {
    bpm: u32,
    interval_ms: f64,
}

impl BeatClock {
    /// A zero tempo is clamped to 1 bpm instead of failing; every
    /// downstream computation stays finite.
    pub fn new(bpm: u32) -> Self {
        let bpm = bpm.max(1);
        BeatClock {
            bpm,
            interval_ms: 60_000.0 / bpm as f64,
        }
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Milliseconds between consecutive beats (60000 / bpm).
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Scores `now_ms` against the beat grid: 100 on the half-beat,
    /// 0 on the boundary.
    pub fn sync_sample(&self, now_ms: u64) -> u32 {
        metrics::sync_sample(now_ms, self.interval_ms)
    }
}

/// Immutable song reference data. The engine never mutates or persists
/// these; a [`Catalog`] owns them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub duration: Duration,
    pub lyrics: Vec<String>,
    pub bpm: u32,
}

impl Song {
    pub fn clock(&self) -> BeatClock {
        BeatClock::new(self.bpm)
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lyrics.get(index).map(String::as_str)
    }

    /// Playback time allotted to each lyric line. A song without
    /// lyrics spans its whole duration as one line.
    pub fn line_duration(&self) -> Duration {
        if self.lyrics.is_empty() {
            return self.duration;
        }
        self.duration.div_f64(self.lyrics.len() as f64)
    }
}

/// Supplies immutable [`Song`] records by identifier.
pub trait Catalog {
    fn song(&self, id: &str) -> Option<&Song>;
    fn songs(&self) -> &[Song];
}

/// The demo catalog bundled with the crate.
pub struct BuiltinCatalog {
    songs: Vec<Song>,
}

fn song(id: &str, title: &str, artist: &str, secs: u64, bpm: u32, lyrics: &[&str]) -> Song {
    Song {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        duration: Duration::from_secs(secs),
        lyrics: lyrics.iter().map(|l| l.to_string()).collect(),
        bpm,
    }
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        BuiltinCatalog {
            songs: vec![
                song(
                    "1",
                    "Digital Dreams",
                    "Cyber Rhythms",
                    180,
                    120,
                    &[
                        "In the digital realm where dreams collide",
                        "Pixels dance and code comes alive",
                        "Every keystroke tells a story",
                        "In this virtual territory",
                        "Type the rhythm feel the beat",
                        "Make your fingers move so sweet",
                        "Digital dreams are calling you",
                        "Let the music guide you through",
                    ],
                ),
                song(
                    "2",
                    "Keyboard Symphony",
                    "Tech Beats",
                    165,
                    140,
                    &[
                        "Click clack goes the keyboard sound",
                        "Every letter makes a beat profound",
                        "Symphony of typing flows",
                        "As the rhythm grows and grows",
                        "Fingers dancing on the keys",
                        "Like a gentle summer breeze",
                        "Type in time and feel the flow",
                        "Let your typing skills just grow",
                    ],
                ),
                song(
                    "3",
                    "Code Runner",
                    "Binary Beats",
                    200,
                    160,
                    &[
                        "Running code at lightning speed",
                        "Every function serves a need",
                        "Variables and loops combine",
                        "In this algorithmic shrine",
                        "Debug errors fix the flow",
                        "Watch your programs start to grow",
                        "Code runner never stops",
                        "Until perfection finally drops",
                    ],
                ),
                song(
                    "custom1",
                    "Clarity",
                    "Zedd",
                    250,
                    120,
                    &[
                        "High Dive into frozen waves",
                        "where the past comes back to life",
                    ],
                ),
            ],
        }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for BuiltinCatalog {
    fn song(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == id)
    }

    fn songs(&self) -> &[Song] {
        &self.songs
    }
}
