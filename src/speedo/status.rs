use crate::speedo::{Mode, SpeedStat};

/// Width the opaque id is padded to when no display name was configured,
/// so that status lines from several unnamed instruments stay aligned.
const LABEL_WIDTH: usize = 36;

/// Pick the label shown at the start of a status line: the display name if
/// one was configured, otherwise the instrument id padded for column display.
pub fn display_label(name: &str, id: &str) -> String {
    if name.is_empty() {
        format!("{:<width$}", id, width = LABEL_WIDTH)
    } else {
        name.to_string()
    }
}

/// Render one human-readable status line for the given mode and stat.
pub fn format_status(mode: Mode, label: &str, stat: &SpeedStat) -> String {
    match mode {
        Mode::Accumulation => {
            format!("{} Speed: {}/min Total: {}", label, stat.speed, stat.value)
        }
        Mode::Variation => {
            format!("{} Value: {} Speed: {:+}/min", label, stat.value, stat.speed)
        }
        Mode::Progress => {
            format!(
                "{} Progress: {}% {}/{} Speed: {}/min",
                label,
                progress_percent(stat.value, stat.total),
                stat.value,
                stat.total,
                stat.speed
            )
        }
    }
}

/// Truncating integer percentage of `value` against `total`.
///
/// A zero total reads as 0% rather than an error, so a progress instrument
/// whose total has not been set yet still formats cleanly. Computed in
/// i128 so totals above `i64::MAX` keep their sign and extreme ratios
/// saturate instead of wrapping.
pub fn progress_percent(value: i64, total: u64) -> i64 {
    if total == 0 {
        return 0;
    }
    (value as i128 * 100 / total as i128).clamp(i64::MIN as i128, i64::MAX as i128) as i64
}
