use anyhow::Result;

use speedo::cli;
use speedo::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse_args();

    logging::setup_logger(args.verbosity)?;

    cli::run(args).await
}
