//! # Engine Settings
//!
//! Configuration for the engine, loadable from a TOML file. Every field has a
//! default, so a partial file only overrides what it names:
//!
//! ```toml
//! [report]
//! date_format = "%Y-%m-%d %H:%M"
//!
//! [layout]
//! bottom_margin_mm = 20.0
//!
//! [layout.body]
//! font_size_pt = 11.0
//! bold = false
//! x_mm = 25.0
//! advance_mm = 8.0
//! ```

use std::fs;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{CalcError, CalcResult};
use crate::render::PageLayout;

/// Default `createdAt` format: `31.12.2025 14:05:09`
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Settings applied when a report is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// chrono strftime pattern for `createdAt`
    pub date_format: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Root settings container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub report: ReportSettings,
    pub layout: PageLayout,
}

impl EngineSettings {
    /// Parse settings from TOML text and validate them.
    pub fn from_toml_str(content: &str, origin: &str) -> CalcResult<Self> {
        let settings: EngineSettings =
            toml::from_str(content).map_err(|e| CalcError::config_error(origin, e.to_string()))?;
        settings
            .validate()
            .map_err(|e| CalcError::config_error(origin, e.to_string()))?;
        Ok(settings)
    }

    /// Load settings from `path`.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CalcError::config_error(path.display().to_string(), e.to_string()))?;
        let settings = Self::from_toml_str(&content, &path.display().to_string())?;
        info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Load settings from `path` if it exists, defaults otherwise.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> CalcResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Render as TOML, e.g. to write a starter config.
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError { reason: e.to_string() })
    }

    pub fn validate(&self) -> CalcResult<()> {
        validate_date_format(&self.report.date_format)?;
        self.layout.validate()
    }
}

fn validate_date_format(format: &str) -> CalcResult<()> {
    if format.trim().is_empty() {
        return Err(CalcError::invalid_input("settings", "date_format is empty"));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(CalcError::invalid_input(
            "settings",
            format!("date_format '{format}' is not a valid strftime pattern"),
        ));
    }
    Ok(())
}
