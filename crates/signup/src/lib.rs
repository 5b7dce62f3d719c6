//! # Signup
//!
//! Terminal front end of the registration form. The form logic itself lives
//! in the `registration` crate; this crate owns the terminal, the event loop,
//! configuration, logging and the command line.

pub mod action;
pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod tui;

use std::io;
use std::process::ExitCode;

use color_eyre::Result;
use tracing::info;

use crate::cli::{Cli, Cmd, DraftCmd};
use crate::config::Config;
use crate::core::{app::SignupApp, r#loop::AppLoop};

pub async fn run(cli: Cli) -> Result<ExitCode> {
    errors::init()?;
    config::ensure_data_and_config_dirs_exist()?;
    let _guard = logging::init()?;

    let command = cli.command();
    info!("Starting {} with {:?}", env!("CARGO_PKG_NAME"), command);

    let mut out = io::stdout();
    match command {
        Cmd::Run { endpoint, no_cache } => {
            let config = Config::new()?;
            let mut app = SignupApp::new(config, endpoint, no_cache);
            AppLoop::new(&mut app)?.run().await?;
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Validate { field, value } => commands::validate_value(&mut out, field, &value),
        Cmd::Draft { action } => {
            let config = Config::new()?;
            let mut cache = commands::file_cache(&config);
            match action {
                DraftCmd::Show => commands::show_draft(&mut out, &cache),
                DraftCmd::Clear => commands::clear_draft(&mut out, &mut cache),
            }
        }
        Cmd::Setup => commands::print_setup(&mut out),
    }
}
