use color_eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use registration::DEFAULT_ENDPOINT;
use serde::Deserialize;
use std::fs;
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::debug;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

/// Where and how registrations are sent.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SubmitConfig {
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default, flatten)]
    pub submit: SubmitConfig,
    /// Ticks per second
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64,
    /// Frames per second
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            submit: SubmitConfig::default(),
            tick_rate: default_tick_rate(),
            frame_rate: default_frame_rate(),
        }
    }
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref LOG_ENV: String = format!("{}_LOG_LEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

impl Config {
    /// Defaults, then `config.json5` / `config.toml` from the config dir,
    /// then `SIGNUP_*` environment variables.
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(
            &get_data_dir(),
            &get_config_dir(),
            config::Environment::with_prefix(&PROJECT_NAME),
        )
    }

    /// Same layering as [`Config::new`] over explicit directories and an
    /// explicit environment source.
    pub fn load(
        data_dir: &Path,
        config_dir: &Path,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().as_ref())?
            .set_default("config_dir", config_dir.to_string_lossy().as_ref())?
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("user_agent", default_user_agent())?
            .set_default("tick_rate", default_tick_rate())?
            .set_default("frame_rate", default_frame_rate())?;

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
            debug!("No configuration file found, using defaults");
        }

        builder = builder.add_source(environment);

        let cfg: Self = builder.build()?.try_deserialize()?;

        Ok(cfg)
    }

    /// Directory holding the draft slot files.
    pub fn storage_dir(&self) -> PathBuf {
        self.config.data_dir.join("storage")
    }
}

fn default_tick_rate() -> f64 {
    4.0
}

fn default_frame_rate() -> f64 {
    30.0
}

pub fn default_user_agent() -> String {
    format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env::consts::OS
    )
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
    ProjectDirs::from("com", "signup", env!("CARGO_PKG_NAME"))
}

pub fn ensure_data_and_config_dirs_exist() -> std::io::Result<()> {
    let data_dir = get_data_dir();
    let config_dir = get_config_dir();

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn no_env() -> config::Environment {
        config::Environment::with_prefix(&PROJECT_NAME).source(Some(config::Map::new()))
    }

    #[test]
    fn defaults_point_at_the_spreadsheet_endpoint() {
        let dirs = TempDir::new().unwrap();
        let c = Config::load(dirs.path(), dirs.path(), no_env()).unwrap();
        assert_eq!(c.submit.endpoint, DEFAULT_ENDPOINT);
        assert!(c.submit.user_agent.starts_with("signup/"));
        assert_eq!(c.tick_rate, 4.0);
        assert_eq!(c.frame_rate, 30.0);
        assert_eq!(c.config.config_dir, dirs.path().to_path_buf());
    }

    #[test]
    fn environment_overrides_config_file() {
        let dirs = TempDir::new().unwrap();
        fs::write(
            dirs.path().join("config.toml"),
            "endpoint = \"http://127.0.0.1:9/file\"\ntick_rate = 10.0\n",
        )
        .unwrap();

        let from_file = Config::load(dirs.path(), dirs.path(), no_env()).unwrap();
        assert_eq!(from_file.submit.endpoint, "http://127.0.0.1:9/file");
        assert_eq!(from_file.tick_rate, 10.0);

        let mut vars = config::Map::new();
        vars.insert(
            format!("{}_ENDPOINT", PROJECT_NAME.as_str()),
            "http://127.0.0.1:9/env".to_string(),
        );
        let env = config::Environment::with_prefix(&PROJECT_NAME).source(Some(vars));
        let from_env = Config::load(dirs.path(), dirs.path(), env).unwrap();
        assert_eq!(from_env.submit.endpoint, "http://127.0.0.1:9/env");
        assert_eq!(from_env.tick_rate, 10.0);
    }

    #[test]
    fn storage_dir_lives_under_data_dir() {
        let mut c = Config::default();
        c.config.data_dir = PathBuf::from("/tmp/signup-data");
        assert_eq!(c.storage_dir(), PathBuf::from("/tmp/signup-data/storage"));
    }
}
