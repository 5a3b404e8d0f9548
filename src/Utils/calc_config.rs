//! # Calculator configuration
//!
//! Settings of the interactive calculator, read from an optional TOML file such as
//!
//! ```toml
//! loglevel = "debug"
//! log_to_file = false
//! prompt = "calc> "
//! quit_command = "q"
//! simplify_derivatives = true
//! start_mode = "d/dx"
//! ```
//!
//! Every key is optional, missing keys keep their defaults and unknown keys are reported
//! with a warning and skipped.
use log::{LevelFilter, warn};
use std::fmt;
use std::fs;
use std::path::Path;

/// file looked up in the working directory when no path is given on the command line
pub const DEFAULT_CONFIG_FILE: &str = "rusted_calc.toml";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Syntax(toml::de::Error),
    WrongType { key: String, expected: &'static str },
    UnknownLogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read configuration file: {}", e),
            ConfigError::Syntax(e) => write!(f, "malformed configuration file: {}", e),
            ConfigError::WrongType { key, expected } => {
                write!(f, "configuration key '{}' must be a {}", key, expected)
            }
            ConfigError::UnknownLogLevel(level) => write!(
                f,
                "loglevel must be debug, info, warn, error or off, got '{}'",
                level
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Syntax(e)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalcConfig {
    /// one of debug, info, warn, error, off; `None` means info
    pub loglevel: Option<String>,
    /// also write the log into `log_<date>_<time>.txt`
    pub log_to_file: bool,
    pub prompt: String,
    pub quit_command: String,
    /// simplify derivatives before printing them
    pub simplify_derivatives: bool,
    /// REPL command applied at startup, e.g. "eval" or "d/dx"
    pub start_mode: Option<String>,
}

impl Default for CalcConfig {
    fn default() -> Self {
        CalcConfig {
            loglevel: None,
            log_to_file: false,
            prompt: "> ".to_string(),
            quit_command: "q".to_string(),
            simplify_derivatives: true,
            start_mode: None,
        }
    }
}

fn expect_str(key: &str, value: &toml::Value) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(|s| s.to_string())
        .ok_or(ConfigError::WrongType {
            key: key.to_string(),
            expected: "string",
        })
}

fn expect_bool(key: &str, value: &toml::Value) -> Result<bool, ConfigError> {
    value.as_bool().ok_or(ConfigError::WrongType {
        key: key.to_string(),
        expected: "boolean",
    })
}

/// maps a log level name onto the filter used by the logger
pub fn level_filter(loglevel: Option<&str>) -> Result<LevelFilter, ConfigError> {
    match loglevel {
        None => Ok(LevelFilter::Info),
        Some(level) => match level {
            "debug" => Ok(LevelFilter::Debug),
            "info" => Ok(LevelFilter::Info),
            "warn" => Ok(LevelFilter::Warn),
            "error" => Ok(LevelFilter::Error),
            "off" => Ok(LevelFilter::Off),
            other => Err(ConfigError::UnknownLogLevel(other.to_string())),
        },
    }
}

impl CalcConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let table = text.parse::<toml::Table>()?;
        let mut config = CalcConfig::default();
        for (key, value) in table.iter() {
            match key.as_str() {
                "loglevel" => {
                    let level = expect_str(key, value)?;
                    level_filter(Some(&level))?;
                    config.loglevel = Some(level);
                }
                "log_to_file" => config.log_to_file = expect_bool(key, value)?,
                "prompt" => config.prompt = expect_str(key, value)?,
                "quit_command" => config.quit_command = expect_str(key, value)?,
                "simplify_derivatives" => config.simplify_derivatives = expect_bool(key, value)?,
                "start_mode" => config.start_mode = Some(expect_str(key, value)?),
                unknown => warn!("unknown configuration key '{}' ignored", unknown),
            }
        }
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Loads `path` when given, otherwise `rusted_calc.toml` if it exists in the working
    /// directory, otherwise the defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(Path::new(path)),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(CalcConfig::default())
                }
            }
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        level_filter(self.loglevel.as_deref())
    }
}
