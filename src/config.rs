//! Application settings.

use crate::dialog::DEFAULT_CONFIRM_TIMEOUT;
use crate::view_model::ViewOptions;
use std::time::Duration;

#[cfg(feature = "config")]
use crate::error::{Error, Result};
#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "config")]
use std::path::Path;

/// Tunables for an alignment session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct Settings {
    /// Seconds the user has to confirm an applied layout.
    pub confirm_timeout_secs: u64,
    /// Pixels moved per arrow key press.
    pub nudge_step: i32,
    /// Pixels moved per Page Up / Page Down press.
    pub page_step: i32,
    /// Distance between horizontal alignment lines.
    pub line_spacing: i32,
    /// Initial view options of every session.
    pub view: ViewOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            confirm_timeout_secs: DEFAULT_CONFIRM_TIMEOUT.as_secs(),
            nudge_step: 1,
            page_step: 10,
            line_spacing: 100,
            view: ViewOptions::default(),
        }
    }
}

impl Settings {
    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }
}

#[cfg(feature = "config")]
impl Settings {
    /// Load settings from a JSON file; a missing or empty file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} not found, using default settings", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_json(&content)
    }

    /// Parse settings from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        settings.validate()
    }

    /// Write settings as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn validate(self) -> Result<Self> {
        if self.confirm_timeout_secs == 0 {
            return Err(Error::Config("confirm_timeout_secs must be positive".into()));
        }
        if self.nudge_step <= 0 || self.page_step <= 0 {
            return Err(Error::Config("nudge steps must be positive".into()));
        }
        if self.line_spacing <= 0 {
            return Err(Error::Config("line_spacing must be positive".into()));
        }
        Ok(self)
    }
}

#[cfg(all(test, feature = "config"))]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "page_step": 25, "view": { "show_cursor_position": true } }"#)
                .unwrap();
        assert_eq!(settings.page_step, 25);
        assert_eq!(settings.nudge_step, 1);
        assert_eq!(settings.confirm_timeout(), Duration::from_secs(15));
        assert!(settings.view.show_cursor_position);
        assert!(settings.view.show_diagonal_lines);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{ "nudge_step": 0 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "confirm_timeout_secs": 0 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("monalign_missing_settings.json");
        let _ = std::fs::remove_file(&path);
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let settings = Settings {
            line_spacing: 50,
            ..Settings::default()
        };
        let path = std::env::temp_dir().join("monalign_test_settings.json");
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
        std::fs::remove_file(&path).unwrap();
    }
}
