// Core instrument: value store, sampling loop, and lifecycle
pub mod status;
pub mod window;

// Re-export key types for convenience
pub use status::{display_label, format_status, progress_percent};
pub use window::{HistoryWindow, WINDOW_CAPACITY};

use anyhow::{Result, bail};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::report::{Reporter, WireFormat};

const DEFAULT_SAMPLE_INTERVAL_SECS: u64 = 1;
const DEFAULT_PRINT_INTERVAL_SECS: u64 = 5;
const DEFAULT_POST_INTERVAL_SECS: u64 = 60;

/// How the tracked quantity is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A monotonically growing total (bytes written, requests served).
    Accumulation,
    /// A freely fluctuating level; the rate can be negative.
    Variation,
    /// A value advancing toward a known total.
    Progress,
}

impl Mode {
    /// Stable numeric code used on the wire.
    pub fn wire_code(self) -> u8 {
        match self {
            Mode::Accumulation => 0,
            Mode::Variation => 1,
            Mode::Progress => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Accumulation => "accumulation",
            Mode::Variation => "variation",
            Mode::Progress => "progress",
        }
    }
}

/// Derived snapshot of the instrument: current value, total, and the
/// windowed rate per minute. Produced on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedStat {
    pub value: i64,
    pub total: u64,
    pub speed: i64,
}

/// Construction-time options. Unset intervals fall back to the defaults
/// (1s sampling, 5s printing, 60s reporting); an empty server disables all
/// network reporting.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Display name; falls back to the generated id when empty.
    pub name: String,
    /// Print a status line on every print interval.
    pub log: bool,
    /// Base URL of the stats server; empty disables reporting.
    pub server: String,
    /// Which push protocol variant to speak.
    pub wire: WireFormat,
    pub sample_interval_secs: Option<u64>,
    pub print_interval_secs: Option<u64>,
    pub post_interval_secs: Option<u64>,
}

/// Value and history share one lock so the sampler and rate computation
/// always observe a consistent pair of (value, window).
struct Shared {
    value: i64,
    total: u64,
    history: HistoryWindow,
}

fn stat_locked(shared: &Shared, sample_period: Duration) -> SpeedStat {
    SpeedStat {
        value: shared.value,
        total: shared.total,
        speed: shared.history.rate_per_minute(sample_period),
    }
}

/// Rate/progress tracker for one quantity.
///
/// Construction spawns the background tasks (sampler always, reporter tasks
/// when a server is configured, status printer when logging was requested),
/// so it must happen inside a tokio runtime. All tasks share one
/// cancellation token and exit on [`Speedometer::stop`].
pub struct Speedometer {
    id: String,
    name: String,
    mode: Mode,
    sample_period: Duration,
    shared: Arc<Mutex<Shared>>,
    cancel: CancellationToken,
    stopped: AtomicBool,
}

impl Speedometer {
    /// Create an accumulation-mode instrument (the default mode).
    pub fn new(options: Options) -> Result<Self> {
        Self::with_mode(Mode::Accumulation, 0, options)
    }

    /// Create a variation-mode instrument for a freely fluctuating value.
    pub fn new_variation(options: Options) -> Result<Self> {
        Self::with_mode(Mode::Variation, 0, options)
    }

    /// Create a progress-mode instrument advancing toward `total`.
    pub fn new_progress(total: u64, options: Options) -> Result<Self> {
        Self::with_mode(Mode::Progress, total, options)
    }

    fn with_mode(mode: Mode, total: u64, options: Options) -> Result<Self> {
        let sample_secs = options
            .sample_interval_secs
            .unwrap_or(DEFAULT_SAMPLE_INTERVAL_SECS);
        if sample_secs == 0 {
            bail!("sampling interval must be at least one second");
        }
        let print_secs = options
            .print_interval_secs
            .unwrap_or(DEFAULT_PRINT_INTERVAL_SECS);
        if print_secs == 0 {
            bail!("print interval must be at least one second");
        }
        let post_secs = options
            .post_interval_secs
            .unwrap_or(DEFAULT_POST_INTERVAL_SECS);
        if post_secs == 0 {
            bail!("post interval must be at least one second");
        }

        let speedo = Self {
            id: Uuid::new_v4().to_string(),
            name: options.name,
            mode,
            sample_period: Duration::from_secs(sample_secs),
            shared: Arc::new(Mutex::new(Shared {
                value: 0,
                total,
                history: HistoryWindow::new(),
            })),
            cancel: CancellationToken::new(),
            stopped: AtomicBool::new(false),
        };

        speedo.spawn_sampler();
        if !options.server.is_empty() {
            let reporter = Arc::new(Reporter::new(
                &options.server,
                &speedo.id,
                &speedo.name,
                mode,
                options.wire,
                Duration::from_secs(post_secs),
            )?);
            speedo.spawn_stat_push(Arc::clone(&reporter));
            speedo.spawn_info_push(reporter);
        }
        if options.log {
            speedo.spawn_printer(Duration::from_secs(print_secs));
        }

        Ok(speedo)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Add a delta to the current value. The delta may be negative.
    pub fn add(&self, delta: i64) {
        let mut guard = self.shared.lock().unwrap();
        guard.value += delta;
    }

    /// Overwrite the current value.
    pub fn set_value(&self, value: i64) {
        let mut guard = self.shared.lock().unwrap();
        guard.value = value;
    }

    /// Overwrite the total a progress instrument is advancing toward.
    pub fn set_total(&self, total: u64) {
        let mut guard = self.shared.lock().unwrap();
        guard.total = total;
    }

    /// Atomic read of (value, total).
    pub fn snapshot(&self) -> (i64, u64) {
        let guard = self.shared.lock().unwrap();
        (guard.value, guard.total)
    }

    /// Derive the current stat: value, total, and windowed rate per minute.
    pub fn stat(&self) -> SpeedStat {
        let guard = self.shared.lock().unwrap();
        stat_locked(&guard, self.sample_period)
    }

    /// Render the same status line the periodic printer would log.
    pub fn status_line(&self) -> String {
        let label = display_label(&self.name, &self.id);
        format_status(self.mode, &label, &self.stat())
    }

    /// Stop every background task. Broadcast once; the tasks observe the
    /// token within one tick period and exit. Calling this twice is a
    /// caller error and is reduced to a warned no-op.
    pub fn stop(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            warn!("stop called more than once on speedometer {}", self.id);
            return;
        }
        self.cancel.cancel();
    }

    fn spawn_sampler(&self) {
        let shared = Arc::clone(&self.shared);
        let cancel = self.cancel.clone();
        let period = self.sample_period;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // the first tick completes immediately; consume it so the first
            // sample lands one full period in
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let mut guard = shared.lock().unwrap();
                        let value = guard.value;
                        guard.history.append(value);
                    }
                }
            }
            debug!("sampler stopped");
        });
    }

    fn spawn_printer(&self, period: Duration) {
        let shared = Arc::clone(&self.shared);
        let cancel = self.cancel.clone();
        let sample_period = self.sample_period;
        let mode = self.mode;
        let label = display_label(&self.name, &self.id);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let stat = {
                            let guard = shared.lock().unwrap();
                            stat_locked(&guard, sample_period)
                        };
                        info!("{}", format_status(mode, &label, &stat));
                    }
                }
            }
            debug!("status printer stopped");
        });
    }

    fn spawn_stat_push(&self, reporter: Arc<Reporter>) {
        let shared = Arc::clone(&self.shared);
        let cancel = self.cancel.clone();
        let sample_period = self.sample_period;
        let period = reporter.post_interval();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        // snapshot under lock, release, then do I/O
                        let stat = {
                            let guard = shared.lock().unwrap();
                            stat_locked(&guard, sample_period)
                        };
                        tokio::select! {
                            _ = cancel.cancelled() => break,
                            _ = reporter.push_stat(&stat) => {}
                        }
                    }
                }
            }
            debug!("stat reporter stopped");
        });
    }

    fn spawn_info_push(&self, reporter: Arc<Reporter>) {
        let shared = Arc::clone(&self.shared);
        let cancel = self.cancel.clone();
        let period = reporter.info_interval();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let total = {
                            let guard = shared.lock().unwrap();
                            guard.total
                        };
                        tokio::select! {
                            _ = cancel.cancelled() => break,
                            _ = reporter.push_info(total) => {}
                        }
                    }
                }
            }
            debug!("info reporter stopped");
        });
    }
}

impl Drop for Speedometer {
    fn drop(&mut self) {
        // background tasks hold only clones of the shared state and the
        // token; cancel here so dropping without an explicit stop does not
        // leave them running
        if !self.stopped.load(Ordering::SeqCst) {
            self.cancel.cancel();
        }
    }
}
