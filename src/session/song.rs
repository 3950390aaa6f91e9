use crate::beat::{BeatClock, Song};
use crate::metrics::{self, Combo, MetricsSnapshot};
use crate::session::{SessionEvent, TestMode};
use crate::utils::epoch_millis;
use std::time::{Duration, Instant};

/// Music-synchronized test. The participant chases the lyric word by
/// word; finishing a word with a trailing space scores it against the
/// beat grid, while anything else only rescores the partial word.
#[derive(Debug, Clone)]
pub struct SongTest {
    song: Song,
    clock: BeatClock,
    lyric_index: usize,
    word_index: usize,
    typed: String,
    playback: Duration,
    playing: bool,
    started_at: Option<Instant>,
    finished: bool,
    correct_chars: usize,
    total_chars: usize,
    combo: Combo,
    accuracy: u32,
    sync_score: u32,
}

impl SongTest {
    pub fn new(song: Song) -> Self {
        let clock = song.clock();
        SongTest {
            song,
            clock,
            lyric_index: 0,
            word_index: 0,
            typed: String::new(),
            playback: Duration::ZERO,
            playing: false,
            started_at: None,
            finished: false,
            correct_chars: 0,
            total_chars: 0,
            combo: Combo::default(),
            accuracy: 100,
            sync_score: 100,
        }
    }

    /// Starts playback. Also invoked implicitly by the first input so
    /// a participant who just starts typing is never scored against a
    /// stopped clock.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
        self.playing = true;
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn current_line(&self) -> &str {
        self.song.line(self.lyric_index).unwrap_or("")
    }

    /// The word the participant is expected to type next. Holds on
    /// the final word once the song is out of lines.
    pub fn current_word(&self) -> &str {
        self.current_line()
            .split(' ')
            .nth(self.word_index)
            .unwrap_or("")
    }

    pub fn lyric_index(&self) -> usize {
        self.lyric_index
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn playback(&self) -> Duration {
        self.playback
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn sync_score(&self) -> u32 {
        self.sync_score
    }

    fn elapsed(&self) -> Duration {
        self.started_at
            .map(|at| at.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    fn write(&mut self, value: &str) {
        let word = self.current_word().to_string();
        if !word.is_empty() && value.ends_with(' ') && value.trim() == word {
            self.complete_word(&word);
        } else {
            self.score_partial(value, &word);
        }
    }

    /// A word landed. Credit its characters plus the separating space,
    /// fold the beat sample into the running sync score and move on to
    /// the next word, spilling into the next line when this one is
    /// exhausted. Past the last line the indices stay put, so the
    /// final word remains current and re-typable until playback ends
    /// the test.
    fn complete_word(&mut self, word: &str) {
        let sample = self.clock.sync_sample(epoch_millis());
        self.sync_score = metrics::blend_sync(self.sync_score, sample);

        let credited = word.chars().count() + 1;
        self.correct_chars += credited;
        self.total_chars += credited;
        self.combo.increment();

        let words_in_line = self.current_line().split(' ').count();
        let next = self.word_index + 1;
        if next < words_in_line {
            self.word_index = next;
        } else if self.lyric_index + 1 < self.song.lyrics.len() {
            self.lyric_index += 1;
            self.word_index = 0;
        }
        self.typed.clear();
    }

    /// Mid-word keystroke. Accuracy is rescored against the current
    /// word alone, the keystroke counts once toward volume and only a
    /// matching final character earns credit. Any imperfection drops
    /// the combo.
    fn score_partial(&mut self, value: &str, word: &str) {
        self.accuracy = metrics::accuracy(value, word);

        self.total_chars += 1;
        let len = value.chars().count();
        if len > 0 {
            let typed_last = value.chars().last();
            if typed_last.is_some() && typed_last == word.chars().nth(len - 1) {
                self.correct_chars += 1;
            }
        }

        if self.accuracy != 100 {
            self.combo.reset();
        }
        self.typed.clear();
        self.typed.push_str(value);
    }

    /// Follows the host track: realigns the current line to the
    /// playback position and ends the test when the track runs out.
    fn seek(&mut self, position: Duration) {
        self.playback = position;

        let line_duration = self.song.line_duration();
        if !line_duration.is_zero() {
            let expected =
                (position.as_secs_f64() / line_duration.as_secs_f64()).floor() as usize;
            if expected != self.lyric_index && expected < self.song.lyrics.len() {
                self.lyric_index = expected;
                self.word_index = 0;
                self.typed.clear();
            }
        }

        if position >= self.song.duration {
            self.playing = false;
            self.finished = true;
        }
    }
}

impl TestMode for SongTest {
    fn advance(&mut self, event: SessionEvent) {
        if self.finished {
            return;
        }
        match event {
            SessionEvent::Input(value) => {
                if !self.playing {
                    self.start();
                }
                self.write(&value);
            }
            SessionEvent::Tick => {}
            SessionEvent::Playback(position) => self.seek(position),
        }
    }

    fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            wpm: metrics::wpm(self.correct_chars, self.elapsed()),
            accuracy: self.accuracy,
            combo: self.combo.streak(),
            max_combo: self.combo.best(),
            correct_chars: self.correct_chars,
            total_chars: self.total_chars,
            sync_score: self.sync_score,
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
