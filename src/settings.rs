use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_LOG_FILTER: &str = "day_planner=warn";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid settings JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Runtime knobs for the console driver. Missing keys fall back to
/// [`Settings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_filter: String,
    pub show_prompt: bool,
    /// Registers the stdout conflict observer on every new schedule.
    pub echo_conflicts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            show_prompt: true,
            echo_conflicts: true,
        }
    }
}

impl Settings {
    pub fn from_json_str(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_json_str(&contents).map_err(|source| SettingsError::Json {
            path: display,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = Settings::from_json_str(r#"{ "show_prompt": false }"#).unwrap();
        assert!(!settings.show_prompt);
        assert!(settings.echo_conflicts);
        assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(Settings::from_json_str(r#"{ "show_prompt": "nope" }"#).is_err());
    }
}
