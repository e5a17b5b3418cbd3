use anyhow::Context;
use clap::Parser;
use travelmap::cli::{run, Cli};
use travelmap::utils::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref()).context("Failed to set up logging")?;

    run(cli).context("Travel map run failed")
}
