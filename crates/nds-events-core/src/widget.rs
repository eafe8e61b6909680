//! Upcoming events sidebar widget.
//!
//! Selects the next few events and renders them as an HTML list. The widget
//! instance (title and limit) is what a site owner configures; the
//! surrounding chrome comes from the theme's sidebar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::datepicker::TranslateError;
use crate::event::Event;
use crate::html::{html_escape, strip_tags};
use crate::phpdate::format_date_time;
use crate::settings::SiteSettings;

const DEFAULT_TITLE: &str = "Upcoming Events";
const DEFAULT_LIMIT: usize = 5;

/// Label of the action button for events tagged for registration.
const REGISTER_LABEL: &str = "Register";
const MORE_LABEL: &str = "More";

/// Saved settings of one widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetInstance {
    /// Heading shown above the list; empty hides it.
    pub title: String,
    /// Maximum number of events shown.
    pub limit: usize,
}

impl Default for WidgetInstance {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl WidgetInstance {
    /// Cleans values submitted from the widget form: tags are stripped from
    /// the title and the limit is at least one.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            title: strip_tags(&self.title),
            limit: self.limit.max(1),
        }
    }
}

/// Markup the sidebar wraps around every widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetChrome {
    pub before_widget: String,
    pub after_widget: String,
    pub before_title: String,
    pub after_title: String,
}

impl WidgetChrome {
    /// Default chrome for the site, with the widget id in the wrapper.
    pub fn for_site(settings: &SiteSettings) -> Self {
        Self {
            before_widget: format!(
                "<section id=\"{}\" class=\"widget {}-upcoming\">",
                widget_id(settings),
                settings.slug
            ),
            after_widget: "</section>".to_string(),
            before_title: "<h3 class=\"widget-title\">".to_string(),
            after_title: "</h3>".to_string(),
        }
    }
}

/// Base id of the widget, derived from the post type.
pub fn widget_id(settings: &SiteSettings) -> String {
    format!("{}_upcoming_events_widget", settings.post_type)
}

/// Returns up to `limit` events that have not ended by `now`, soonest start first.
pub fn select_upcoming(events: &[Event], now: DateTime<Utc>, limit: usize) -> Vec<&Event> {
    let mut upcoming: Vec<&Event> = events.iter().filter(|e| e.is_upcoming(now)).collect();
    upcoming.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    upcoming.truncate(limit);
    debug!(
        total = events.len(),
        shown = upcoming.len(),
        limit,
        "selected upcoming events"
    );
    upcoming
}

/// Renders one list item. `position` starts at 1 and drives odd/even striping.
///
/// # Errors
///
/// Fails if the site's date or time format ends with a lone escape.
pub fn render_item(
    event: &Event,
    position: usize,
    settings: &SiteSettings,
) -> Result<String, TranslateError> {
    let stripe = if position % 2 == 0 { "even" } else { "odd" };
    let start = format_date_time(&event.start, settings)?;
    let categories = event
        .categories
        .iter()
        .map(|t| html_escape(&t.name))
        .collect::<Vec<_>>()
        .join(", ");
    let label = if event.has_tag(REGISTER_LABEL) {
        REGISTER_LABEL
    } else {
        MORE_LABEL
    };

    let mut lines = vec![
        format!(
            "<li id=\"post-{}\" class=\"upcoming-event-{stripe} clearfix\">",
            event.id
        ),
        "    <div class=\"event-details\">".to_string(),
        format!("        <h5>{}</h5>", html_escape(&event.title)),
    ];
    if categories.is_empty() {
        lines.push(format!("        {}", html_escape(&start)));
    } else {
        lines.push(format!("        {} / {categories}", html_escape(&start)));
    }
    if let Some(location) = event.location.as_deref().filter(|l| !l.is_empty()) {
        lines.push(format!("        <br/>Location: {}", html_escape(location)));
    }
    lines.push("    </div>".to_string());
    lines.push(format!(
        "    <button class=\"btn\"><a href=\"{}\">{label}</a></button>",
        html_escape(event.link().unwrap_or("#"))
    ));
    lines.push("</li>".to_string());

    Ok(lines.join("\n"))
}

/// Renders the whole widget for the events upcoming at `now`.
///
/// # Errors
///
/// Fails if the site's date or time format ends with a lone escape.
pub fn render(
    instance: &WidgetInstance,
    chrome: &WidgetChrome,
    events: &[Event],
    now: DateTime<Utc>,
    settings: &SiteSettings,
) -> Result<String, TranslateError> {
    let mut out = vec![chrome.before_widget.clone()];
    if !instance.title.is_empty() {
        out.push(format!(
            "{}{}{}",
            chrome.before_title,
            html_escape(&instance.title),
            chrome.after_title
        ));
    }

    let upcoming = select_upcoming(events, now, instance.limit);
    if upcoming.is_empty() {
        out.push("<p class=\"no-events\">No upcoming events.</p>".to_string());
    } else {
        out.push("<ul class=\"upcoming-events\">".to_string());
        for (index, event) in upcoming.iter().enumerate() {
            out.push(render_item(event, index + 1, settings)?);
        }
        out.push("</ul>".to_string());
    }

    out.push(chrome.after_widget.clone());
    Ok(out.join("\n"))
}
