//! Encryptico license tool
//!
//! Vendor-side helper for issuing and checking offline license keys:
//! 1. Generate a key from a vendor password
//! 2. Verify a key string or a local license file
//! 3. Write a license file for distribution
//!
//! Usage:
//!   licensectl generate --password <PASSWORD>
//!   licensectl check --file license.lic

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use licensectl::{run, Cli};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    debug!("licensectl starting");
    let outcome = run(&cli.command)?;
    println!("{outcome}");

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
