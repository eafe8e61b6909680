//! Event details meta box on the edit screen.
//!
//! [`MetaBoxForm::from_meta`] fills the box from an event's post meta,
//! [`render`] turns it into HTML, and [`save`] reads a submitted form back
//! into post meta. Dates are shown and read in the site's date format and
//! times in its time format.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::admin::datepicker_options;
use crate::datepicker::TranslateError;
use crate::event::{Event, EventError};
use crate::html::{html_escape, strip_tags};
use crate::phpdate::{DateParseError, format_php_date, parse_php_date, parse_php_time};
use crate::settings::{MetaKeys, SiteSettings};

/// Errors raised while showing or saving the meta box.
#[derive(Debug, Error)]
pub enum MetaBoxError {
    /// The submitted nonce is absent or does not match.
    #[error("nonce verification failed")]
    InvalidNonce,

    /// A required form field was not submitted.
    #[error("missing form field {0}")]
    MissingField(String),

    /// A submitted date or time does not match the site format.
    #[error("invalid value in {field}: {source}")]
    InvalidDate {
        field: String,
        source: DateParseError,
    },

    #[error(transparent)]
    Format(#[from] TranslateError),

    #[error(transparent)]
    Event(#[from] EventError),

    #[error("failed to encode date picker options: {0}")]
    Options(#[from] serde_json::Error),
}

/// Names of the inputs in the meta box.
///
/// Date, location and URL inputs reuse the meta keys; the time inputs have
/// no meta of their own and are merged into the date on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub location: String,
    pub url: String,
    pub nonce: String,
}

impl FieldNames {
    pub fn new(settings: &SiteSettings) -> Self {
        let keys = settings.meta_keys();
        let pt = &settings.post_type;
        Self {
            start_time: format!("{pt}_start_time"),
            end_time: format!("{pt}_end_time"),
            start_date: keys.start_date,
            end_date: keys.end_date,
            location: keys.location,
            url: keys.url,
            nonce: keys.nonce,
        }
    }
}

/// Values shown in the meta box inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaBoxForm {
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub location: String,
    pub url: String,
}

impl MetaBoxForm {
    /// Fills the form from an event's post meta.
    ///
    /// A new event has no start meta yet; both start and end are then
    /// prefilled with `now`.
    ///
    /// # Errors
    ///
    /// Fails if the stored timestamps are unreadable or a site format ends
    /// with a lone escape.
    pub fn from_meta(
        id: u64,
        meta: &HashMap<String, String>,
        now: DateTime<Utc>,
        settings: &SiteSettings,
    ) -> Result<Self, MetaBoxError> {
        let keys = settings.meta_keys();
        let has_start = meta
            .get(&keys.start_date)
            .is_some_and(|v| !v.trim().is_empty());

        let event = if has_start {
            Event::from_meta(id, "", meta, &keys)?
        } else {
            debug!(event_id = id, "no start date stored, prefilling with now");
            let mut event = Event::new(id, "", now, now);
            event.location = meta.get(&keys.location).cloned();
            event.url = meta.get(&keys.url).cloned();
            event
        };

        Ok(Self {
            start_date: format_php_date(&event.start, &settings.date_format)?,
            start_time: format_php_date(&event.start, &settings.time_format)?,
            end_date: format_php_date(&event.end, &settings.date_format)?,
            end_time: format_php_date(&event.end, &settings.time_format)?,
            location: event.location.unwrap_or_default(),
            url: event.url.unwrap_or_default(),
        })
    }
}

/// Renders the meta box HTML, including the hidden nonce input and the
/// script attaching the date picker to the date inputs.
///
/// # Errors
///
/// Fails if a site format ends with a lone escape.
pub fn render(
    form: &MetaBoxForm,
    nonce: &str,
    settings: &SiteSettings,
) -> Result<String, MetaBoxError> {
    let names = FieldNames::new(settings);
    let hint = format_php_date(&DateTime::<Utc>::default(), &settings.time_format)?;
    let options = datepicker_options(settings)?;
    let options_json = serde_json::to_string(&options)?;

    let input = |name: &str, value: &str, extra: &str| {
        format!(
            "<input type=\"text\" name=\"{name}\"{extra} value=\"{}\" />",
            html_escape(value)
        )
    };
    let date_input = |name: &str, value: &str| input(name, value, " class=\"eventdate\"");
    let wide_input = |name: &str, value: &str| input(name, value, " size=\"70\"");

    let lines = [
        format!(
            "<input type=\"hidden\" name=\"{}\" id=\"{}-nonce\" value=\"{}\" />",
            names.nonce,
            settings.slug,
            html_escape(nonce)
        ),
        format!("<ul class=\"{}-meta clearfix\">", settings.slug),
        "    <li class=\"clearfix\">".to_string(),
        format!(
            "        <label>Start Date: </label>{}",
            date_input(&names.start_date, &form.start_date)
        ),
        format!(
            "        <label>Start Time: </label>{} <em>(e.g. {})</em>",
            input(&names.start_time, &form.start_time, ""),
            html_escape(&hint)
        ),
        "    </li>".to_string(),
        "    <li class=\"clearfix\">".to_string(),
        format!(
            "        <label>End Date: </label>{}",
            date_input(&names.end_date, &form.end_date)
        ),
        format!(
            "        <label>End Time: </label>{} <em>(e.g. {})</em>",
            input(&names.end_time, &form.end_time, ""),
            html_escape(&hint)
        ),
        "    </li>".to_string(),
        format!(
            "    <li class=\"clearfix\"><label>Location: </label>{}</li>",
            wide_input(&names.location, &form.location)
        ),
        format!(
            "    <li class=\"clearfix\"><label>URL: </label>{}</li>",
            wide_input(&names.url, &form.url)
        ),
        "</ul>".to_string(),
        format!(
            "<script type=\"text/javascript\">jQuery(function ($) {{ $(\"{}\").datepicker({options_json}); }});</script>",
            options.selector
        ),
    ];
    Ok(lines.join("\n"))
}

/// Reads a submitted meta box into the post meta to store.
///
/// The start date is required. End date, location and URL are only written
/// when submitted; a missing time means midnight. Location and URL have
/// their tags stripped.
///
/// # Errors
///
/// Fails on a nonce mismatch, a missing start date, or a date/time that
/// does not match the site formats.
pub fn save(
    id: u64,
    submitted: &HashMap<String, String>,
    expected_nonce: &str,
    settings: &SiteSettings,
) -> Result<HashMap<String, String>, MetaBoxError> {
    let names = FieldNames::new(settings);
    if submitted.get(&names.nonce).map(String::as_str) != Some(expected_nonce) {
        warn!(event_id = id, "rejecting meta box save with a bad nonce");
        return Err(MetaBoxError::InvalidNonce);
    }

    let start = read_date_time(submitted, &names.start_date, &names.start_time, settings)?
        .ok_or_else(|| MetaBoxError::MissingField(names.start_date.clone()))?;
    let end = read_date_time(submitted, &names.end_date, &names.end_time, settings)?;

    let mut event = Event::new(id, "", start, end.unwrap_or(start));
    event.location = submitted.get(&names.location).map(|v| strip_tags(v));
    event.url = submitted.get(&names.url).map(|v| strip_tags(v));

    let keys: MetaKeys = settings.meta_keys();
    let mut meta = event.to_meta(&keys);
    if end.is_none() {
        meta.remove(&keys.end_date);
    }
    if event.location.is_none() {
        meta.remove(&keys.location);
    }
    if event.url.is_none() {
        meta.remove(&keys.url);
    }
    debug!(event_id = id, fields = meta.len(), "saved meta box");
    Ok(meta)
}

fn read_date_time(
    submitted: &HashMap<String, String>,
    date_field: &str,
    time_field: &str,
    settings: &SiteSettings,
) -> Result<Option<DateTime<Utc>>, MetaBoxError> {
    let Some(date) = submitted.get(date_field) else {
        return Ok(None);
    };
    let date = parse_php_date(date, &settings.date_format).map_err(|source| {
        MetaBoxError::InvalidDate {
            field: date_field.to_string(),
            source,
        }
    })?;
    let time = match submitted.get(time_field).filter(|t| !t.trim().is_empty()) {
        Some(time) => parse_php_time(time, &settings.time_format).map_err(|source| {
            MetaBoxError::InvalidDate {
                field: time_field.to_string(),
                source,
            }
        })?,
        None => NaiveTime::default(),
    };
    Ok(Some(NaiveDateTime::new(date, time).and_utc()))
}
