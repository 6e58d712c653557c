//! Parser settings with persistence
//!
//! Settings are read from `--config <path>` or `~/.config/eqlog/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use eqlog_report::ReadOptions;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All parser settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    pub ingest: IngestSettings,
    pub report: ReportSettings,
}

impl ParserSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("eqlog"))
    }

    /// Get the default settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from the given file or the default location,
    /// falling back to defaults if missing or invalid
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let Some(path) = Self::settings_path() else {
                    warn!("Could not determine config directory");
                    return Self::default();
                };
                path
            }
        };

        if !path.exists() {
            if explicit.is_some() {
                warn!("Settings file {:?} not found, using defaults", path);
            } else {
                info!("No settings file found, using defaults");
            }
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }
}

/// Log reading settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Abort when a bracketed line has an unparseable timestamp
    pub strict_timestamps: bool,
    /// Only read this many log lines
    pub max_lines: Option<usize>,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            strict_timestamps: true,
            max_lines: None,
        }
    }
}

impl IngestSettings {
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            strict_timestamps: self.strict_timestamps,
            max_lines: self.max_lines,
        }
    }
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Keep rows for narration that matched no combat rule
    pub include_unknown: bool,
    /// Also write `<output>.summary.csv`
    pub summary: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            include_unknown: true,
            summary: false,
        }
    }
}
