use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::state::AppState;
use crate::errors::{AppError, AppResult};

pub mod state; // use submodule at src/config/state.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory this configuration was loaded from. Runtime-only.
    #[serde(skip)]
    dir: PathBuf,

    /// Base URL of the TimeTagger server, always stored with a trailing '/'.
    pub server_url: String,

    /// API token sent as the `authtoken` header. Empty = not logged in.
    #[serde(default)]
    pub api_token: String,

    /// Default `list`/`tags` window, in days.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,
}

fn default_lookback_days() -> i64 {
    7
}

const DEFAULT_SERVER_URL: &str = "https://timetagger.app/";

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: Self::config_dir(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            api_token: String::new(),
            lookback_days: default_lookback_days(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtagger")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rtagger")
        }
    }

    /// Pick the effective directory, honoring the global `--config-dir`
    /// override (useful for tests or multiple accounts).
    pub fn resolve_dir(override_dir: Option<&str>) -> PathBuf {
        match override_dir {
            Some(dir) => PathBuf::from(dir),
            None => Self::config_dir(),
        }
    }

    /// Return the full path of the config file inside `dir`
    pub fn config_file(dir: &Path) -> PathBuf {
        dir.join("rtagger.conf")
    }

    /// Load configuration from `dir`, or return defaults if no file exists.
    pub fn load_from(dir: &Path) -> AppResult<Self> {
        let path = Self::config_file(dir);

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content).map_err(|_| AppError::ConfigLoad)?
        } else {
            Config::default()
        };

        cfg.dir = dir.to_path_buf();
        Ok(cfg)
    }

    /// Write the configuration back to its directory, creating it if needed.
    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(&self.dir)?;
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::write(Self::config_file(&self.dir), yaml).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_logged_in(&self) -> bool {
        !self.api_token.trim().is_empty()
    }

    /// Store new connection details, keeping the URL slash-terminated.
    pub fn set_connection(&mut self, url: &str, token: &str) {
        self.server_url = if url.ends_with('/') {
            url.to_string()
        } else {
            format!("{}/", url)
        };
        self.api_token = token.to_string();
    }

    /// Per-session durable state living next to the config file.
    pub fn state(&self) -> AppState {
        AppState::new(self.dir.clone())
    }
}
