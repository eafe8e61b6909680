//! Upcoming events widget command.

use chrono::{DateTime, Utc};
use tracing::info;

use nds_events_core::Event;
use nds_events_core::widget::{self, WidgetChrome, WidgetInstance};

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Options for a widget render, layered over the configured instance.
#[derive(Debug, Default)]
pub struct UpcomingOptions {
    pub limit: Option<usize>,
    pub title: Option<String>,
    pub now: Option<i64>,
}

/// Renders the widget HTML for `events`.
pub fn run(events: &[Event], options: UpcomingOptions, config: &Config) -> CliResult<String> {
    let instance = WidgetInstance {
        title: options.title.unwrap_or_else(|| config.widget.title.clone()),
        limit: options.limit.unwrap_or(config.widget.limit),
    }
    .sanitize();

    let now = match options.now {
        Some(secs) => DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| CliError::Input(format!("timestamp out of range: {}", secs)))?,
        None => Utc::now(),
    };

    info!(limit = instance.limit, %now, "rendering upcoming events widget");
    let chrome = WidgetChrome::for_site(&config.site);
    Ok(widget::render(&instance, &chrome, events, now, &config.site)?)
}
