//! Bulletin CLI: content client for the association website.
//!
//! Fetches announcement and member records from the CMS, normalized and
//! ranked for display, with bundled fixture data when the CMS is down.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
