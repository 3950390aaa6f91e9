#[cfg(test)]
mod tests {
    use crate::metrics::{
        accuracy, blend_sync, correct_chars, sync_sample, wpm, Combo, MetricsSnapshot,
    };
    use std::time::Duration;

    #[test]
    fn test_correct_chars_positional() {
        assert_eq!(correct_chars("", "cat"), 0);
        assert_eq!(correct_chars("c", "cat"), 1);
        assert_eq!(correct_chars("ca", "cat"), 2);
        assert_eq!(correct_chars("cax", "cat"), 2);
        assert_eq!(correct_chars("xat", "cat"), 2);
        // typed longer than the target: the overhang can never match
        assert_eq!(correct_chars("cats", "cat"), 3);
    }

    #[test]
    fn test_correct_chars_misalignment_is_intentional() {
        // one inserted character ruins the rest of the comparison
        assert_eq!(correct_chars("tthe", "the"), 0);
    }

    #[test]
    fn test_accuracy_bounds_and_empty_input() {
        assert_eq!(accuracy("", "anything"), 100);
        assert_eq!(accuracy("zzz", "cat"), 0);
        assert_eq!(accuracy("cat", "cat"), 100);

        for typed in ["c", "ca", "cax", "qqq", "catx", ""] {
            let a = accuracy(typed, "cat");
            assert!(a <= 100, "accuracy {} out of range for {:?}", a, typed);
        }
    }

    #[test]
    fn test_accuracy_rounding_scenario() {
        // target "cat", inputs "c", "ca", "cax"
        assert_eq!(accuracy("c", "cat"), 100);
        assert_eq!(accuracy("ca", "cat"), 100);
        assert_eq!(accuracy("cax", "cat"), 67); // round(2/3 * 100)
    }

    #[test]
    fn test_wpm_basic() {
        // 50 correct characters in one minute = 10 words
        assert_eq!(wpm(50, Duration::from_secs(60)), 10);
        // 25 correct characters in 30 seconds = 10 wpm as well
        assert_eq!(wpm(25, Duration::from_secs(30)), 10);
    }

    #[test]
    fn test_wpm_degenerate_time_is_zero() {
        assert_eq!(wpm(100, Duration::ZERO), 0);
        assert_eq!(wpm(0, Duration::ZERO), 0);
        assert_eq!(wpm(0, Duration::from_secs(60)), 0);
    }

    #[test]
    fn test_sync_sample_half_beat_peak() {
        // bpm 120 -> 500ms interval; the half-beat lands at 250
        assert_eq!(sync_sample(250, 500.0), 100);
        assert_eq!(sync_sample(750, 500.0), 100);
    }

    #[test]
    fn test_sync_sample_beat_boundary_is_zero() {
        assert_eq!(sync_sample(0, 500.0), 0);
        assert_eq!(sync_sample(500, 500.0), 0);
        assert_eq!(sync_sample(1000, 500.0), 0);
    }

    #[test]
    fn test_sync_sample_quarter_beat() {
        assert_eq!(sync_sample(125, 500.0), 50);
        assert_eq!(sync_sample(375, 500.0), 50);
    }

    #[test]
    fn test_sync_sample_degenerate_interval() {
        assert_eq!(sync_sample(123, 0.0), 0);
        assert_eq!(sync_sample(123, -10.0), 0);
    }

    #[test]
    fn test_blend_sync_recurrence() {
        assert_eq!(blend_sync(100, 50), 75);
        // 62.5 rounds up, matching the recorded recurrence
        assert_eq!(blend_sync(75, 50), 63);
        assert_eq!(blend_sync(100, 100), 100);
        assert_eq!(blend_sync(0, 0), 0);
    }

    #[test]
    fn test_combo_streak_and_best() {
        let mut combo = Combo::default();
        assert_eq!(combo.streak(), 0);
        assert_eq!(combo.best(), 0);

        combo.increment();
        combo.increment();
        assert_eq!(combo.streak(), 2);
        assert_eq!(combo.best(), 2);

        combo.reset();
        assert_eq!(combo.streak(), 0);
        assert_eq!(combo.best(), 2, "best never decreases");

        combo.increment();
        assert_eq!(combo.streak(), 1);
        assert_eq!(combo.best(), 2);
    }

    #[test]
    fn test_max_combo_monotone_over_any_sequence() {
        let mut combo = Combo::default();
        let mut previous_best = 0;
        for step in [true, true, false, true, true, true, false, true] {
            if step {
                combo.increment();
            } else {
                combo.reset();
            }
            assert!(combo.best() >= previous_best);
            previous_best = combo.best();
        }
        assert_eq!(combo.best(), 3);
    }

    #[test]
    fn test_snapshot_defaults_and_wire_names() {
        let snapshot = MetricsSnapshot::default();
        assert_eq!(snapshot.accuracy, 100);
        assert_eq!(snapshot.sync_score, 100);
        assert_eq!(snapshot.wpm, 0);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"maxCombo\":0"));
        assert!(json.contains("\"correctChars\":0"));
        assert!(json.contains("\"syncScore\":100"));
    }
}
