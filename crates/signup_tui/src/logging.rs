use std::{env, fs, path::Path};

use color_eyre::Result;
use lazy_static::lazy_static;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::{APP_NAME, PROJECT_NAME};

lazy_static! {
    pub static ref LOG_ENV: String = format!("{}_LOG_LEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{APP_NAME}.log");
}

#[cfg(debug_assertions)]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;
#[cfg(not(debug_assertions))]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::WARN;

/// Filter directives: `SIGNUP_LOG_LEVEL`, then `RUST_LOG`, then the build default.
fn filter_directives() -> String {
    env::var(LOG_ENV.as_str())
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_LEVEL.to_string())
}

/// Log to `<data_dir>/signup.log`. The terminal owns stdout, so there is no console layer.
///
/// The returned guard flushes the non-blocking writer and must live until exit.
pub fn init(data_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(data_dir)?;

    let file_appender = tracing_appender::rolling::never(data_dir, LOG_FILE.as_str());
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(filter_directives())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL.to_string()));

    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(guard)
}
