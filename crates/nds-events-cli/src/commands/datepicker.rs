//! Datepicker command.

use tracing::debug;

use nds_events_core::{SiteSettings, datepicker_options, php_to_datepicker};

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Translates `format`, or the configured date format if none is given.
///
/// With `json`, prints the options object the edit screen passes to the
/// date picker instead of the bare pattern.
pub fn run(format: Option<&str>, json: bool, config: &Config) -> CliResult<String> {
    let format = format.unwrap_or(&config.site.date_format);
    debug!(format, json, "translating date format");

    if !json {
        return Ok(php_to_datepicker(format)?);
    }

    let settings = SiteSettings {
        date_format: format.to_string(),
        ..config.site.clone()
    };
    let options = datepicker_options(&settings)?;
    serde_json::to_string(&options)
        .map_err(|e| CliError::Input(format!("failed to serialize options: {}", e)))
}
