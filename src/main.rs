use anyhow::Result;
use clap::Parser;
use wallet::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
