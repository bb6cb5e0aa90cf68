// User configuration: ~/.dpanel/rc
//
// Plain `key=value` lines; blank lines and `#` comments are skipped.
//   data.location=<path>        registry file (relative paths resolve against ~/.dpanel)
//   color=auto|always|never     ANSI colors in chart and legend
//   chart.width=<cells>         width of the distribution bar (1..=500)

use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR: &str = ".dpanel";
const CONFIG_FILE: &str = "rc";
const DEFAULT_DB_FILE: &str = "panel.db";

/// Widest distribution bar accepted from the config
pub const MAX_CHART_WIDTH: usize = 500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to determine home directory")]
    NoHome,
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid value '{value}' for '{key}' in config file (line {line})")]
    InvalidValue { key: String, value: String, line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_location: PathBuf,
    pub color: ColorMode,
    pub chart_width: Option<usize>,
}

impl Config {
    /// Load the configuration for the current user's home directory
    pub fn load() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Self::load_from_home(&home)
    }

    /// Load the configuration rooted at `home`. A missing rc file means defaults.
    pub fn load_from_home(home: &Path) -> Result<Self, ConfigError> {
        let config_dir = home.join(CONFIG_DIR);
        let config_path = config_dir.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Self::defaults(&config_dir));
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;
        log::debug!("loaded config from {}", config_path.display());
        Self::parse(&contents, &config_dir)
    }

    fn defaults(config_dir: &Path) -> Self {
        Self {
            data_location: config_dir.join(DEFAULT_DB_FILE),
            color: ColorMode::Auto,
            chart_width: None,
        }
    }

    /// Parse rc contents; relative paths resolve against `config_dir`
    pub fn parse(contents: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::defaults(config_dir);

        for (idx, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                log::warn!("ignoring malformed config line {}: {}", idx + 1, line);
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            let invalid = || ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                line: idx + 1,
            };

            match key {
                "data.location" => {
                    if value.is_empty() {
                        return Err(invalid());
                    }
                    let path = PathBuf::from(value);
                    config.data_location = if path.is_relative() {
                        config_dir.join(path)
                    } else {
                        path
                    };
                }
                "color" => {
                    config.color = ColorMode::from_str(value).ok_or_else(invalid)?;
                }
                "chart.width" => {
                    let width = value
                        .parse::<usize>()
                        .ok()
                        .filter(|w| (1..=MAX_CHART_WIDTH).contains(w))
                        .ok_or_else(invalid)?;
                    config.chart_width = Some(width);
                }
                other => log::warn!("ignoring unknown config key '{}'", other),
            }
        }

        Ok(config)
    }
}
