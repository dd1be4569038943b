//! Persisted source/target language preferences.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::lang;

const CONFIG_DIR_ENV: &str = "WT_CONFIG_DIR";
const APP_DIR_NAME: &str = "wt";
const FILE_NAME: &str = "settings.json";

const DEFAULT_SOURCE: &str = "en";
const DEFAULT_TARGETS: [&str; 3] = ["en", "es", "fr"];

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("unable to determine the user configuration directory (set WT_CONFIG_DIR)")]
    ConfigDirUnknown,

    #[error("failed to read settings file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to create settings directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write settings file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// User language preferences.
///
/// After [`Settings::normalize`], `target_languages` is strictly ascending,
/// holds only catalog codes, and contains `source_language`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub target_languages: Vec<String>,
    #[serde(default)]
    pub source_language: String,
}

/// Command-line overrides applied on top of the persisted record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub from: Option<String>,
    pub to: Option<Vec<String>>,
}

impl Settings {
    /// `from=` replaces the source language; `to=` replaces the whole target
    /// list rather than extending it.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(from) = &overrides.from {
            self.source_language = from.clone();
        }
        if let Some(to) = &overrides.to {
            self.target_languages = to.clone();
        }
    }

    pub fn normalize(&mut self) {
        let before = self.target_languages.len();
        let mut targets: Vec<String> = self
            .target_languages
            .iter()
            .map(|code| clean_code(code))
            .filter(|code| lang::is_supported(code))
            .collect();
        if targets.len() != before {
            warn!(
                dropped = before - targets.len(),
                "ignoring unsupported target languages"
            );
        }
        targets.sort();
        targets.dedup();
        if targets.is_empty() {
            targets = DEFAULT_TARGETS.iter().map(|c| c.to_string()).collect();
        }

        let mut source = clean_code(&self.source_language);
        if !source.is_empty() && lang::is_unsupported(&source) {
            warn!(source = %source, "ignoring unsupported source language");
            source.clear();
        }
        if source.is_empty() {
            source = if targets.iter().any(|c| c == DEFAULT_SOURCE) {
                DEFAULT_SOURCE.to_string()
            } else {
                targets[0].clone()
            };
        }

        // Invariant: the source language is always one of the targets, kept in
        // sorted position so lookups over the list stay valid.
        if let Err(pos) = targets.binary_search(&source) {
            targets.insert(pos, source.clone());
        }

        self.target_languages = targets;
        self.source_language = source;
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn pretty(&self) -> Result<String, SettingsError> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    /// The result is normalized.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let mut settings = match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str::<Settings>(&text).map_err(|source| {
                SettingsError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                Settings::default()
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        settings.normalize();
        Ok(settings)
    }

    /// Normalizes, then creates or truncates `path`. Parent directories are
    /// created as needed.
    pub fn save(&mut self, path: &Path) -> Result<(), SettingsError> {
        self.normalize();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| SettingsError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let text = self.pretty()?;
        fs::write(path, text).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}

fn clean_code(code: &str) -> String {
    code.trim().to_ascii_lowercase()
}

/// Location of `settings.json`.
///
/// `WT_CONFIG_DIR` names the directory directly; otherwise the platform user
/// configuration directory gets a `wt/` subdirectory.
pub fn settings_path() -> Result<PathBuf, SettingsError> {
    if let Some(dir) = non_empty_env(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir).join(FILE_NAME));
    }
    let base = user_config_dir().ok_or(SettingsError::ConfigDirUnknown)?;
    Ok(base.join(APP_DIR_NAME).join(FILE_NAME))
}

fn user_config_dir() -> Option<PathBuf> {
    if cfg!(windows) {
        return non_empty_env("APPDATA").map(PathBuf::from);
    }
    if cfg!(target_os = "macos") {
        return non_empty_env("HOME")
            .map(|home| PathBuf::from(home).join("Library/Application Support"));
    }
    if let Some(xdg) = non_empty_env("XDG_CONFIG_HOME") {
        let xdg = PathBuf::from(xdg);
        if xdg.is_absolute() {
            return Some(xdg);
        }
    }
    non_empty_env("HOME").map(|home| PathBuf::from(home).join(".config"))
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
