use anyhow::Result;
use tracing::Level;

/// Set up logging based on verbosity level
pub fn setup_logger(verbosity: u8) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(get_log_level(verbosity))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    Ok(())
}

/// Get the appropriate log level based on verbosity
///
/// Status lines are emitted at INFO, so they are visible without any
/// verbosity flags; extra flags reveal the diagnostics around them.
pub fn get_log_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
