//! Event records.
//!
//! An [`Event`] is the plain-data view of an events post: its title, the
//! start/end timestamps and location/URL stored in post meta, and the terms
//! of its category and tag taxonomies.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::settings::MetaKeys;

/// Errors that can occur while reading an event from post meta.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// A required meta field is absent.
    #[error("event {id}: missing meta field {key}")]
    MissingField { id: u64, key: String },

    /// A timestamp meta field is not a Unix timestamp.
    #[error("event {id}: invalid timestamp in {key}: {value:?}")]
    InvalidTimestamp { id: u64, key: String, value: String },
}

/// A taxonomy term (category or tag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Display name.
    pub name: String,
    /// URL-safe slug.
    pub slug: String,
}

impl Term {
    /// Creates a term from its name and slug.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// An event post.
///
/// Start and end are serialized as Unix timestamps, the same representation
/// used in post meta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Post ID.
    pub id: u64,
    /// Post title.
    pub title: String,
    /// When the event starts.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub start: DateTime<Utc>,
    /// When the event ends.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub end: DateTime<Utc>,
    /// Free-form location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// External event URL (e.g. a registration page).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The post's own page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    /// Category terms.
    #[serde(default)]
    pub categories: Vec<Term>,
    /// Tag terms.
    #[serde(default)]
    pub tags: Vec<Term>,
}

impl Event {
    /// Creates an event with the required fields.
    pub fn new(id: u64, title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            start,
            end,
            location: None,
            url: None,
            permalink: None,
            categories: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the external URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the permalink.
    #[must_use]
    pub fn with_permalink(mut self, permalink: impl Into<String>) -> Self {
        self.permalink = Some(permalink.into());
        self
    }

    /// Adds a category term.
    #[must_use]
    pub fn with_category(mut self, term: Term) -> Self {
        self.categories.push(term);
        self
    }

    /// Adds a tag term.
    #[must_use]
    pub fn with_tag(mut self, term: Term) -> Self {
        self.tags.push(term);
        self
    }

    /// Reads an event from its post-meta fields.
    ///
    /// Start and end are required. Empty location/URL values are treated as
    /// absent, and URLs that do not parse are dropped with a warning.
    pub fn from_meta(
        id: u64,
        title: impl Into<String>,
        meta: &HashMap<String, String>,
        keys: &MetaKeys,
    ) -> Result<Self, EventError> {
        let start = read_timestamp(id, meta, &keys.start_date)?;
        let end = read_timestamp(id, meta, &keys.end_date)?;

        let mut event = Self::new(id, title, start, end);
        event.location = read_text(meta, &keys.location);
        event.url = read_text(meta, &keys.url).filter(|raw| match Url::parse(raw) {
            Ok(_) => true,
            Err(e) => {
                warn!(event_id = id, url = %raw, error = %e, "dropping invalid event URL");
                false
            }
        });
        Ok(event)
    }

    /// Writes the meta fields of this event.
    pub fn to_meta(&self, keys: &MetaKeys) -> HashMap<String, String> {
        let mut meta = HashMap::new();
        meta.insert(keys.start_date.clone(), self.start.timestamp().to_string());
        meta.insert(keys.end_date.clone(), self.end.timestamp().to_string());
        meta.insert(
            keys.location.clone(),
            self.location.clone().unwrap_or_default(),
        );
        meta.insert(keys.url.clone(), self.url.clone().unwrap_or_default());
        meta
    }

    /// Returns the link visitors should follow: the event URL if set,
    /// otherwise the permalink.
    pub fn link(&self) -> Option<&str> {
        self.url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or(self.permalink.as_deref())
    }

    /// Returns true if the event has not finished by `now`, so events
    /// already in progress still count.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.end > now
    }

    /// Returns true if any tag name or slug contains `needle`, ignoring case.
    pub fn has_tag(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.tags.iter().any(|t| {
            t.name.to_lowercase().contains(&needle) || t.slug.to_lowercase().contains(&needle)
        })
    }

    /// Returns true if the event is in the category with the given slug.
    pub fn in_category(&self, slug: &str) -> bool {
        self.categories.iter().any(|t| t.slug == slug)
    }
}

fn read_timestamp(
    id: u64,
    meta: &HashMap<String, String>,
    key: &str,
) -> Result<DateTime<Utc>, EventError> {
    let raw = meta.get(key).ok_or_else(|| EventError::MissingField {
        id,
        key: key.to_string(),
    })?;
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| EventError::InvalidTimestamp {
            id,
            key: key.to_string(),
            value: raw.clone(),
        })
}

fn read_text(meta: &HashMap<String, String>, key: &str) -> Option<String> {
    meta.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
