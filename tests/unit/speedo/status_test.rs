mod status_formatter_tests {
    use speedo::speedo::{Mode, SpeedStat, display_label, format_status, progress_percent};

    #[test]
    fn accumulation_shows_speed_and_total() {
        let stat = SpeedStat {
            value: 20,
            total: 0,
            speed: 60,
        };
        let line = format_status(Mode::Accumulation, "uploads", &stat);
        assert_eq!(line, "uploads Speed: 60/min Total: 20");
    }

    #[test]
    fn variation_shows_signed_speed() {
        let stat = SpeedStat {
            value: 40,
            total: 0,
            speed: -3600,
        };
        let line = format_status(Mode::Variation, "queue-depth", &stat);
        assert_eq!(line, "queue-depth Value: 40 Speed: -3600/min");

        let stat = SpeedStat {
            value: 90,
            total: 0,
            speed: 120,
        };
        let line = format_status(Mode::Variation, "queue-depth", &stat);
        assert_eq!(line, "queue-depth Value: 90 Speed: +120/min");
    }

    #[test]
    fn progress_shows_percent_and_fraction() {
        let stat = SpeedStat {
            value: 25,
            total: 50,
            speed: 10,
        };
        let line = format_status(Mode::Progress, "restore", &stat);
        assert!(line.contains("50%"), "missing percent in: {line}");
        assert!(line.contains("25/50"), "missing fraction in: {line}");
    }

    #[test]
    fn progress_percent_truncates() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 66);
        assert_eq!(progress_percent(50, 50), 100);
    }

    #[test]
    fn progress_percent_handles_totals_beyond_i64() {
        // a total above i64::MAX must not wrap negative
        assert_eq!(progress_percent(25, u64::MAX), 0);
        assert_eq!(progress_percent(i64::MAX, u64::MAX), 49);
        // and an extreme ratio saturates instead of wrapping
        assert_eq!(progress_percent(i64::MAX, 1), i64::MAX);
        assert_eq!(progress_percent(i64::MIN, 1), i64::MIN);
    }

    #[test]
    fn progress_percent_with_zero_total_is_zero() {
        assert_eq!(progress_percent(25, 0), 0);
        let stat = SpeedStat {
            value: 25,
            total: 0,
            speed: 0,
        };
        // must format, not crash
        let line = format_status(Mode::Progress, "restore", &stat);
        assert!(line.contains("0%"));
    }

    #[test]
    fn label_prefers_the_name() {
        assert_eq!(display_label("uploads", "some-id"), "uploads");
    }

    #[test]
    fn label_falls_back_to_padded_id() {
        let label = display_label("", "abc123");
        assert!(label.starts_with("abc123"));
        assert_eq!(label.len(), 36);
    }

    #[test]
    fn uuid_sized_id_is_not_padded_further() {
        let id = "0a0b0c0d-0e0f-1011-1213-141516171819";
        assert_eq!(display_label("", id), id);
    }
}
