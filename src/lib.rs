// Re-export modules so they can be used from tests
pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
pub mod speedo;

pub use report::{Reporter, WireFormat};
pub use speedo::{Mode, Options, SpeedStat, Speedometer};
