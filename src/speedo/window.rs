use std::collections::VecDeque;
use std::time::Duration;

/// Samples retained for rate estimation: 61 entries, i.e. 60 intervals.
pub const WINDOW_CAPACITY: usize = 61;

/// Bounded, chronologically ordered buffer of past value samples.
///
/// The sampler appends one entry per tick; once the buffer is full each
/// insertion evicts the oldest entry. The rate estimate below is linear over
/// the whole retained window, which smooths short-term jitter at the cost of
/// lagging real changes by up to the window depth.
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    samples: VecDeque<i64>,
    capacity: usize,
}

impl HistoryWindow {
    pub fn new() -> Self {
        Self::with_capacity(WINDOW_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a sample, evicting the oldest one once the window is full.
    pub fn append(&mut self, value: i64) {
        self.samples.push_back(value);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn oldest(&self) -> Option<i64> {
        self.samples.front().copied()
    }

    pub fn newest(&self) -> Option<i64> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Signed rate of change per minute over the retained window.
    ///
    /// With fewer than two samples there is nothing to compare yet and the
    /// rate is 0; a zero elapsed time (zero or sub-millisecond period)
    /// reads the same way rather than dividing.
    pub fn rate_per_minute(&self, sample_period: Duration) -> i64 {
        let len = self.samples.len();
        if len <= 1 {
            return 0;
        }

        let elapsed_ms = (len as u128 - 1) * sample_period.as_millis();
        if elapsed_ms == 0 {
            return 0;
        }

        // len >= 2, so front/back both exist
        let first = self.samples.front().copied().unwrap_or(0);
        let last = self.samples.back().copied().unwrap_or(0);
        let delta = last as i128 - first as i128;

        (delta * 60_000 / elapsed_ms as i128).clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new()
    }
}
