//! Container configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use tabview_bar::{BarMetrics, Theme};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial theme
    pub theme: Theme,
    /// Container title, shown when the active tab has none
    pub title: Option<String>,
    /// Bar geometry
    pub metrics: BarMetrics,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;

        tracing::debug!(path = %path.display(), "Loaded container config");

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.theme.validate()?;

        let metrics = &self.metrics;
        for (name, value) in [
            ("title_height", metrics.title_height),
            ("tab_strip_height", metrics.tab_strip_height),
            ("separator_height", metrics.separator_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Config(format!(
                    "{name} must be a non-negative length, got {value}"
                )));
            }
        }

        Ok(())
    }
}
