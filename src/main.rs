use anyhow::Result;
use clap::Parser;
use tiendita::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
