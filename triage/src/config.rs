use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::Level;
use triage_markup::Theme;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const ENV_BASE_URL: &str = "TRIAGE_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "TRIAGE_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "TRIAGE_LOG_LEVEL";
pub const ENV_THEME: &str = "TRIAGE_THEME";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// One layer of configuration; unset keys fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure_tls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl ConfigFile {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Missing files are an empty layer.
    pub fn from_optional_path(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::from_path(path),
            _ => Ok(Self::default()),
        }
    }

    /// Reads the `TRIAGE_*` variables. A `.env` file in the working
    /// directory is loaded first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let var = |key: &str| envmnt::exists(key).then(|| envmnt::get_or(key, ""));
        let request_timeout_secs = match var(ENV_TIMEOUT_SECS) {
            Some(raw) => Some(raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: ENV_TIMEOUT_SECS,
                value: raw,
            })?),
            None => None,
        };

        Ok(Self {
            base_url: var(ENV_BASE_URL),
            request_timeout_secs,
            insecure_tls: None,
            log_level: var(ENV_LOG_LEVEL),
            theme: var(ENV_THEME),
        })
    }

    /// `upper` wins wherever it sets a key.
    pub fn merge(self, upper: ConfigFile) -> ConfigFile {
        ConfigFile {
            base_url: upper.base_url.or(self.base_url),
            request_timeout_secs: upper.request_timeout_secs.or(self.request_timeout_secs),
            insecure_tls: upper.insecure_tls.or(self.insecure_tls),
            log_level: upper.log_level.or(self.log_level),
            theme: upper.theme.or(self.theme),
        }
    }
}

pub struct ConfigStore {
    local_root: PathBuf,
    global_root: Option<PathBuf>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            local_root: PathBuf::from(".triage"),
            global_root: default_global_root(),
        }
    }

    pub fn with_roots(local_root: impl Into<PathBuf>, global_root: Option<PathBuf>) -> Self {
        Self {
            local_root: local_root.into(),
            global_root,
        }
    }

    pub fn local_config_path(&self) -> PathBuf {
        self.local_root.join("config.toml")
    }

    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.global_root.as_ref().map(|p| p.join("config.toml"))
    }

    /// Global, then local, then `explicit` (which must exist).
    pub fn load_files(&self, explicit: Option<&Path>) -> Result<ConfigFile, ConfigError> {
        let global = ConfigFile::from_optional_path(self.global_config_path().as_deref())?;
        let local = ConfigFile::from_optional_path(Some(&self.local_config_path()))?;
        let merged = global.merge(local);
        match explicit {
            Some(path) => Ok(merged.merge(ConfigFile::from_path(path)?)),
            None => Ok(merged),
        }
    }

    /// Every file layer with the environment on top.
    pub fn load_merged(&self, explicit: Option<&Path>) -> Result<ConfigFile, ConfigError> {
        Ok(self.load_files(explicit)?.merge(ConfigFile::from_env()?))
    }
}

fn default_global_root() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(Path::new(&home).join(".config").join("triage"))
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Each step raises the log level above the configured one.
    pub verbose: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub request_timeout: Duration,
    pub insecure_tls: bool,
    pub log_level: Level,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            insecure_tls: false,
            log_level: Level::WARN,
            theme: Theme::default(),
        }
    }
}

impl Settings {
    pub fn resolve(file: ConfigFile, overrides: &Overrides) -> Result<Self, ConfigError> {
        let base_url = overrides
            .base_url
            .clone()
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "base_url",
                value: base_url,
            });
        }

        let timeout_secs = overrides
            .timeout_secs
            .or(file.request_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "request_timeout_secs",
                value: timeout_secs.to_string(),
            });
        }

        let configured_level = match file.log_level {
            Some(raw) => Level::from_str(raw.trim()).map_err(|_| ConfigError::Invalid {
                key: "log_level",
                value: raw,
            })?,
            None => Level::WARN,
        };

        let theme = match file.theme {
            Some(raw) => Theme::from_str(raw.trim()).map_err(|_| ConfigError::Invalid {
                key: "theme",
                value: raw,
            })?,
            None => Theme::default(),
        };

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            insecure_tls: file.insecure_tls.unwrap_or(false),
            log_level: raise_level(configured_level, overrides.verbose),
            theme,
        })
    }

    pub fn display(&self) {
        println!("{}", "Current configuration (merged):".bright_cyan().bold());
        println!();
        let rows = [
            ("base_url", self.base_url.clone()),
            (
                "timeout",
                format!("{}s", self.request_timeout.as_secs()),
            ),
            ("insecure_tls", self.insecure_tls.to_string()),
            ("log_level", self.log_level.to_string().to_lowercase()),
            ("theme", self.theme.to_string()),
        ];
        for (name, value) in rows {
            println!("  {:<14} = {}", name.bright_blue(), value.bright_white());
        }
        println!();
    }
}

fn raise_level(level: Level, steps: u8) -> Level {
    const LADDER: [Level; 5] = [
        Level::ERROR,
        Level::WARN,
        Level::INFO,
        Level::DEBUG,
        Level::TRACE,
    ];
    let current = LADDER.iter().position(|l| *l == level).unwrap_or(1);
    let raised = (current + usize::from(steps)).min(LADDER.len() - 1);
    LADDER[raised]
}
