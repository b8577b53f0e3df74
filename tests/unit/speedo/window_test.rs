mod history_window_tests {
    use std::time::Duration;

    use speedo::speedo::{HistoryWindow, WINDOW_CAPACITY};

    const ONE_SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn empty_window_has_zero_rate() {
        let window = HistoryWindow::new();
        assert!(window.is_empty());
        assert_eq!(window.rate_per_minute(ONE_SECOND), 0);
    }

    #[test]
    fn single_sample_has_zero_rate() {
        let mut window = HistoryWindow::new();
        window.append(12345);
        assert_eq!(window.len(), 1);
        assert_eq!(window.rate_per_minute(ONE_SECOND), 0);
    }

    #[test]
    fn rate_is_linear_over_the_window() {
        // one increment per one-second tick: 60 per minute
        let mut window = HistoryWindow::new();
        for value in 0..=20 {
            window.append(value);
        }
        assert_eq!(window.rate_per_minute(ONE_SECOND), 60);
    }

    #[test]
    fn rate_matches_first_last_formula() {
        let mut window = HistoryWindow::new();
        window.append(7);
        window.append(100);
        window.append(250);
        // (250 - 7) * 60 / ((3 - 1) * 5)
        assert_eq!(window.rate_per_minute(Duration::from_secs(5)), 1458);
    }

    #[test]
    fn decreasing_values_give_negative_rate() {
        let mut window = HistoryWindow::new();
        window.append(100);
        window.append(40);
        assert_eq!(window.rate_per_minute(ONE_SECOND), -3600);
    }

    #[test]
    fn capacity_is_sixty_intervals() {
        assert_eq!(WINDOW_CAPACITY, 61);
    }

    #[test]
    fn window_never_exceeds_capacity() {
        let mut window = HistoryWindow::new();
        for value in 0..200 {
            window.append(value);
            assert!(window.len() <= WINDOW_CAPACITY);
        }
        assert_eq!(window.len(), WINDOW_CAPACITY);
    }

    #[test]
    fn full_window_keeps_the_most_recent_samples() {
        let mut window = HistoryWindow::new();
        for value in 0..100 {
            window.append(value);
        }
        // entries 0..=38 were evicted, the rest survive in order
        assert_eq!(window.oldest(), Some(39));
        assert_eq!(window.newest(), Some(99));
        // steady +1 per tick still reads as 60/min over the retained window
        assert_eq!(window.rate_per_minute(ONE_SECOND), 60);
    }

    #[test]
    fn truncating_division_in_rate() {
        let mut window = HistoryWindow::new();
        window.append(0);
        window.append(0);
        window.append(1);
        // 1 * 60 / (2 * 1) = 30, exact; now a case that truncates:
        assert_eq!(window.rate_per_minute(ONE_SECOND), 30);

        let mut window = HistoryWindow::new();
        window.append(0);
        window.append(1);
        // 1 * 60 / (1 * 7) = 8.57... truncates to 8
        assert_eq!(window.rate_per_minute(Duration::from_secs(7)), 8);
    }

    #[test]
    fn sub_second_periods_do_not_divide_by_zero() {
        let mut window = HistoryWindow::new();
        window.append(0);
        window.append(10);
        // 10 * 60000 / 500 = 1200/min
        assert_eq!(window.rate_per_minute(Duration::from_millis(500)), 1200);
    }

    #[test]
    fn zero_elapsed_time_reads_as_zero_rate() {
        let mut window = HistoryWindow::new();
        window.append(0);
        window.append(10);
        assert_eq!(window.rate_per_minute(Duration::ZERO), 0);
        assert_eq!(window.rate_per_minute(Duration::from_micros(100)), 0);
    }

    #[test]
    fn extreme_deltas_saturate_instead_of_overflowing() {
        let mut window = HistoryWindow::new();
        window.append(i64::MIN);
        window.append(i64::MAX);
        assert_eq!(window.rate_per_minute(ONE_SECOND), i64::MAX);
    }

    #[test]
    fn small_capacity_window_evicts_fifo() {
        let mut window = HistoryWindow::with_capacity(3);
        for value in [1, 2, 3, 4, 5] {
            window.append(value);
        }
        assert_eq!(window.len(), 3);
        assert_eq!(window.oldest(), Some(3));
        assert_eq!(window.newest(), Some(5));
    }
}
