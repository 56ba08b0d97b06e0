//! User settings
//!
//! Persisted to `<config dir>/tagview/settings.json`. Command-line flags
//! take precedence over anything stored here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Label stored in summaries when no `--source` is given
    pub source: Option<String>,
    /// Whether directory scans follow symlinks
    pub follow_links: bool,
    /// Terminal log level ("error", "warn", "info", "debug", "trace")
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: None,
            follow_links: false,
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    const SETTINGS_FILE: &'static str = "settings.json";

    /// Get the settings file path (~/.config/tagview/settings.json on Linux)
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tagview").join(Self::SETTINGS_FILE))
    }

    /// Load settings from disk, or return defaults if missing or invalid
    pub fn load() -> Self {
        let (settings, outcome) = Self::load_checked();
        Self::log_outcome(&outcome);
        settings
    }

    /// Like [`Settings::load`], but hands back the outcome instead of
    /// logging it, for callers that set up logging from these settings
    pub fn load_checked() -> (Self, Result<PathBuf>) {
        match Self::settings_path() {
            Some(path) => {
                let (settings, outcome) = Self::load_checked_from(&path);
                (settings, outcome.map(|()| path))
            }
            None => (Self::default(), Err(anyhow!("No config directory"))),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let (settings, outcome) = Self::load_checked_from(path);
        Self::log_outcome(&outcome.map(|()| path.to_path_buf()));
        settings
    }

    fn load_checked_from(path: &Path) -> (Self, Result<()>) {
        match Self::try_load(path) {
            Ok(settings) => (settings, Ok(())),
            Err(e) => (Self::default(), Err(e)),
        }
    }

    /// Report where settings came from
    pub fn log_outcome(outcome: &Result<PathBuf>) {
        match outcome {
            Ok(path) => log::debug!("Loaded settings from {}", path.display()),
            Err(e) => log::debug!("Using default settings: {:#}", e),
        }
    }

    fn try_load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Settings file not found");
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;

        serde_json::from_str(&contents).context("Failed to parse settings")
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path().context("Could not determine config directory")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write settings: {}", path.display()))?;

        log::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Parsed log level; unrecognized names fall back to warn
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&temp_dir.path().join("settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_json_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_checked_load_reports_why_defaults_were_used() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let (settings, outcome) = Settings::load_checked_from(&path);
        assert_eq!(settings, Settings::default());
        assert!(outcome.unwrap_err().to_string().contains("not found"));

        std::fs::write(&path, "[]").unwrap();
        let (_, outcome) = Settings::load_checked_from(&path);
        assert!(outcome.unwrap_err().to_string().contains("parse"));

        std::fs::write(&path, r#"{"log_level": "info"}"#).unwrap();
        let (settings, outcome) = Settings::load_checked_from(&path);
        assert!(outcome.is_ok());
        assert_eq!(settings.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_load_never_fails() {
        // Whatever is on disk, a usable value comes back
        let _settings = Settings::load();
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"follow_links": true}"#).unwrap();

        let settings = Settings::load_from(&path);
        assert!(settings.follow_links);
        assert_eq!(settings.source, None);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");
        let settings = Settings {
            source: Some("vinyl rips".to_string()),
            follow_links: true,
            log_level: "debug".to_string(),
        };

        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_level_filter() {
        let mut settings = Settings::default();
        assert_eq!(settings.level_filter(), LevelFilter::Warn);
        settings.log_level = "DEBUG".to_string();
        assert_eq!(settings.level_filter(), LevelFilter::Debug);
        settings.log_level = "loud".to_string();
        assert_eq!(settings.level_filter(), LevelFilter::Warn);
    }
}
