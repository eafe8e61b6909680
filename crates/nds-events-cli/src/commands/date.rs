//! Date command.

use chrono::{DateTime, Utc};

use nds_events_core::{format_date_time, format_php_date};

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Renders `timestamp` (or now) with `format`, or with the site's date and
/// time formats if no format is given.
pub fn run(format: Option<&str>, timestamp: Option<i64>, config: &Config) -> CliResult<String> {
    let dt = match timestamp {
        Some(secs) => DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| CliError::Input(format!("timestamp out of range: {}", secs)))?,
        None => Utc::now(),
    };
    let rendered = match format {
        Some(format) => format_php_date(&dt, format)?,
        None => format_date_time(&dt, &config.site)?,
    };
    Ok(rendered)
}
