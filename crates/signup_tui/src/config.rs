use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use color_eyre::{Result, eyre::eyre};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;
use signup::DEFAULT_ENDPOINT;
use tracing::warn;

use crate::cli::RunArgs;

/// Binary name; also the stem of env vars, directories and the log file.
pub const APP_NAME: &str = "signup";

lazy_static! {
    pub static ref PROJECT_NAME: String = APP_NAME.to_uppercase();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

/// Runtime configuration.
///
/// Layered: built-in defaults, then `config.json5` / `config.toml` from the
/// config directory, then `SIGNUP_*` environment variables, then CLI flags.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub banner_secs: u64,
    pub tick_rate: f64,
    pub frame_rate: f64,
    pub theme: String,
}

impl Config {
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(&get_data_dir(), &get_config_dir())
    }

    pub fn load(data_dir: &Path, config_dir: &Path) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("request_timeout_secs", 10)?
            .set_default("banner_secs", 3)?
            .set_default("tick_rate", 4.0)?
            .set_default("frame_rate", 30.0)?
            .set_default("theme", "dark")?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            warn!(dir = %config_dir.display(), "no configuration file found, using defaults");
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&PROJECT_NAME)
                .prefix_separator("_")
                .try_parsing(true),
        );

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.check_rates().map_err(config::ConfigError::Message)?;
        Ok(cfg)
    }

    /// Apply flags from `signup run` on top of the loaded layers.
    pub fn with_overrides(mut self, args: &RunArgs) -> Result<Self> {
        if let Some(endpoint) = &args.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(tick_rate) = args.tick_rate {
            self.tick_rate = tick_rate;
        }
        if let Some(frame_rate) = args.frame_rate {
            self.frame_rate = frame_rate;
        }
        self.check_rates().map_err(|msg| eyre!(msg))?;
        Ok(self)
    }

    /// Tick and frame rates become interval periods, so both must be finite and positive.
    fn check_rates(&self) -> Result<(), String> {
        for (key, rate) in [("tick_rate", self.tick_rate), ("frame_rate", self.frame_rate)] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(format!("{key} must be a positive number, got {rate}"));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn banner_duration(&self) -> Duration {
        Duration::from_secs(self.banner_secs)
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", APP_NAME, APP_NAME)
}
