use std::io;

use clap::Parser;
use tracing::debug;

use praxis_cli::{Cli, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;
    debug!(?cli, "Parsed command line");

    let stdout = io::stdout();
    cli.run(&mut stdout.lock())
}
