pub mod args;

pub use args::{Args, ModeArg, WireArg};

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{info, warn};

use crate::config::Config;
use crate::report::WireFormat;
use crate::speedo::{Options, Speedometer};

pub fn parse_args() -> Args {
    Args::parse()
}

/// Merge command-line flags over file-based defaults into construction
/// options. Flags always win; the file only fills gaps.
pub fn build_options(args: &Args, file: &Config) -> Options {
    let wire = args
        .wire
        .map(WireFormat::from)
        .or_else(|| file.wire.as_deref().and_then(args::parse_wire_name))
        .unwrap_or_default();

    Options {
        name: args
            .name
            .clone()
            .or_else(|| file.name.clone())
            .unwrap_or_default(),
        log: args.log || file.log.unwrap_or(false),
        server: args
            .server
            .clone()
            .or_else(|| file.server.clone())
            .unwrap_or_default(),
        wire,
        sample_interval_secs: args.sample_interval.or(file.sample_interval_secs),
        print_interval_secs: args.print_interval.or(file.print_interval_secs),
        post_interval_secs: args.post_interval.or(file.post_interval_secs),
    }
}

/// Count stdin lines through a speedometer until EOF or CTRL+C.
pub async fn run(args: Args) -> Result<()> {
    let file = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Could not load config file, using defaults: {}", e);
            Config::default()
        }
    };
    let options = build_options(&args, &file);

    let speedo = match args.mode {
        ModeArg::Accumulation => Speedometer::new(options)?,
        ModeArg::Variation => Speedometer::new_variation(options)?,
        ModeArg::Progress => Speedometer::new_progress(args.total.unwrap_or(0), options)?,
    };

    tracing::debug!(
        "Speedometer {} started in {} mode",
        speedo.id(),
        speedo.mode().as_str()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Interrupted, stopping");
                break;
            }
            line = lines.next_line() => match line? {
                Some(_) => speedo.add(1),
                None => break,
            }
        }
    }

    // final status before the background tasks go away
    info!("{}", speedo.status_line());
    speedo.stop();
    Ok(())
}
