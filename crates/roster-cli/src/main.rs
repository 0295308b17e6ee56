use std::io::Write;

use anyhow::Result;
use clap::Parser;
use roster_cli::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    roster_cli::logging::init(cli.verbose);

    let output = roster_cli::run(&cli.command)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
