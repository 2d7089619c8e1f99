//! User settings read from a TOML file.
//!
//! Every field has a default, so an empty or partial file is valid:
//!
//! ```toml
//! [display]
//! prompt = "factor> "
//! color = true
//!
//! [logging]
//! level = "warn"
//! file = "/tmp/factor.log"
//!
//! [panel]
//! sidebar_width = 30
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::logging::DEFAULT_DIRECTIVE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration in '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub display: DisplaySettings,
    pub logging: LoggingSettings,
    pub panel: PanelSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySettings {
    /// Prompt shown by the line front end.
    pub prompt: String,
    pub color: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            prompt: "factor> ".to_string(),
            color: true,
        }
    }
}

impl DisplaySettings {
    /// Whether output should be colored, honouring `NO_COLOR`.
    pub fn use_color(&self) -> bool {
        self.color && std::env::var_os("NO_COLOR").is_none_or(|value| value.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// `EnvFilter` directive.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_DIRECTIVE.to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelSettings {
    pub sidebar_width: u16,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self { sidebar_width: 30 }
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads settings from `path`. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `explicit` if given, otherwise the file at [`default_path`]
    /// when it exists, otherwise the defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("no configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line flags on top of file values.
    pub fn with_overrides(
        mut self,
        log_level: Option<String>,
        log_file: Option<PathBuf>,
    ) -> Self {
        if let Some(level) = log_level {
            self.logging.level = level;
        }
        if log_file.is_some() {
            self.logging.file = log_file;
        }
        self
    }
}

/// `<config dir>/factor-calc/config.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("factor-calc").join("config.toml"))
}
