use color_eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

use crate::config;

/// Route all tracing output to `<data_dir>/signup.log`.
///
/// The terminal belongs to the TUI, so nothing is written to stdout. The
/// filter comes from `SIGNUP_LOG_LEVEL`, then `RUST_LOG`, then `info`.
/// Keep the returned guard alive until shutdown or buffered lines are lost.
pub fn init() -> Result<WorkerGuard> {
    let directory = config::get_data_dir();
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::never(&directory, config::LOG_FILE.as_str());
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let builder = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into());
    let env_filter = builder
        .clone()
        .with_env_var(config::LOG_ENV.as_str())
        .try_from_env()
        .or_else(|_| builder.clone().try_from_env())
        .unwrap_or_else(|_| builder.parse_lossy(""));

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(non_blocking)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(guard)
}
