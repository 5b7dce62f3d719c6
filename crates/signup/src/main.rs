use std::process::ExitCode;

use clap::Parser;
use color_eyre::Result;
use signup::cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    signup::run(Cli::parse()).await
}
