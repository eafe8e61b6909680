//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/nds-events/config.toml` by default:
//!
//! ```toml
//! debug = false
//! log_format = "compact"
//!
//! [site]
//! post_type = "nds_wp_event"
//! date_format = "F j, Y"
//! time_format = "g:i a"
//!
//! [widget]
//! title = "Upcoming Events"
//! limit = 5
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use nds_events_core::{SiteSettings, TracingOutputFormat, WidgetInstance, php_to_datepicker};

/// Configuration for the nds-events CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Debug mode.
    pub debug: bool,

    /// Log output format.
    pub log_format: TracingOutputFormat,

    /// Site naming and date formats.
    pub site: SiteSettings,

    /// Upcoming events widget settings.
    pub widget: WidgetInstance,
}

impl Config {
    /// Loads configuration from the default path, or defaults if it does not exist.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Checks that the configured values are usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.site.post_type.is_empty() {
            return Err("site.post_type must not be empty".to_string());
        }
        if self.site.post_type.len() > 20 {
            return Err(format!(
                "site.post_type must be at most 20 characters, got {}",
                self.site.post_type.len()
            ));
        }
        if self.site.slug.is_empty() {
            return Err("site.slug must not be empty".to_string());
        }
        if self.widget.limit == 0 {
            return Err("widget.limit must be at least 1".to_string());
        }
        php_to_datepicker(&self.site.date_format)
            .map_err(|e| format!("site.date_format: {}", e))?;
        php_to_datepicker(&self.site.time_format)
            .map_err(|e| format!("site.time_format: {}", e))?;
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nds-events")
    }
}
