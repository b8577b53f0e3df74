use clap::{Parser, ValueEnum};

use crate::report::WireFormat;
use crate::speedo::Mode;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Track a changing quantity and report its windowed rate",
    long_about = "Speedo reads lines from stdin, counts them through a rate instrument,\n\
and periodically prints a status line and/or pushes JSON snapshots to a stats server.\n\
The rate is a linear estimate over a sliding window of up to 60 sampling intervals,\n\
normalized to a per-minute unit.\n\
\n\
Examples:\n\
  tail -f access.log | speedo --log --name requests\n\
  producer | speedo --server http://stats:8080 --post-interval 30\n\
  cp-progress | speedo --mode progress --total 5000 --log"
)]
pub struct Args {
    /// Display name for the instrument (falls back to a generated id)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Print a status line on a fixed interval
    #[arg(short, long)]
    pub log: bool,

    /// Base URL of a stats server; enables HTTP push reporting
    #[arg(short, long)]
    pub server: Option<String>,

    /// Push protocol variant
    #[arg(long, value_enum)]
    pub wire: Option<WireArg>,

    /// Tracking mode
    #[arg(short, long, value_enum, default_value_t = ModeArg::Accumulation)]
    pub mode: ModeArg,

    /// Known total for progress mode
    #[arg(long)]
    pub total: Option<u64>,

    /// Seconds between value samples
    #[arg(long)]
    pub sample_interval: Option<u64>,

    /// Seconds between printed status lines
    #[arg(long)]
    pub print_interval: Option<u64>,

    /// Seconds between HTTP stat pushes
    #[arg(long)]
    pub post_interval: Option<u64>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Accumulation,
    Variation,
    Progress,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Accumulation => Mode::Accumulation,
            ModeArg::Variation => Mode::Variation,
            ModeArg::Progress => Mode::Progress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WireArg {
    /// Instrument id embedded in the URL path (/stat/<id>)
    PathId,
    /// Instrument id embedded in the JSON body (/stat)
    BodyId,
}

impl From<WireArg> for WireFormat {
    fn from(arg: WireArg) -> Self {
        match arg {
            WireArg::PathId => WireFormat::PathId,
            WireArg::BodyId => WireFormat::BodyId,
        }
    }
}

/// Parse a wire variant name coming from the config file.
pub fn parse_wire_name(name: &str) -> Option<WireFormat> {
    match name {
        "path-id" => Some(WireFormat::PathId),
        "body-id" => Some(WireFormat::BodyId),
        _ => None,
    }
}
