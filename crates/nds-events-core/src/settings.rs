//! Site settings shared by every component.
//!
//! The post type and slug are passed explicitly to whatever needs them; all
//! meta-field and taxonomy names are derived from the post type.

use serde::{Deserialize, Serialize};

/// Default plugin slug.
pub const DEFAULT_SLUG: &str = "nds-wp-events";

/// Default post type name.
pub const DEFAULT_POST_TYPE: &str = "nds_wp_event";

/// Site-wide naming and display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Plugin slug, used for CSS classes and nonces.
    pub slug: String,

    /// Post type name, used as the prefix of every meta key.
    pub post_type: String,

    /// PHP `date()` pattern for dates.
    pub date_format: String,

    /// PHP `date()` pattern for times.
    pub time_format: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            slug: DEFAULT_SLUG.to_string(),
            post_type: DEFAULT_POST_TYPE.to_string(),
            date_format: "F j, Y".to_string(),
            time_format: "g:i a".to_string(),
        }
    }
}

impl SiteSettings {
    /// Returns the meta keys for this site's post type.
    pub fn meta_keys(&self) -> MetaKeys {
        MetaKeys::new(&self.post_type)
    }
}

/// Post-meta and taxonomy names derived from a post type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaKeys {
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub url: String,
    pub category: String,
    pub tag: String,
    pub nonce: String,
}

impl MetaKeys {
    /// Derives every key from `post_type`.
    pub fn new(post_type: &str) -> Self {
        Self {
            start_date: format!("{post_type}_start_date"),
            end_date: format!("{post_type}_end_date"),
            location: format!("{post_type}_location"),
            url: format!("{post_type}_url"),
            category: format!("{post_type}_category"),
            tag: format!("{post_type}_tag"),
            nonce: format!("{post_type}_nonce"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = SiteSettings::default();
        assert_eq!(settings.slug, "nds-wp-events");
        assert_eq!(settings.post_type, "nds_wp_event");
        assert_eq!(settings.date_format, "F j, Y");
        assert_eq!(settings.time_format, "g:i a");
    }

    #[test]
    fn meta_keys_follow_post_type() {
        let keys = MetaKeys::new("daybreak_event");
        assert_eq!(keys.start_date, "daybreak_event_start_date");
        assert_eq!(keys.end_date, "daybreak_event_end_date");
        assert_eq!(keys.location, "daybreak_event_location");
        assert_eq!(keys.url, "daybreak_event_url");
        assert_eq!(keys.category, "daybreak_event_category");
        assert_eq!(keys.tag, "daybreak_event_tag");
        assert_eq!(keys.nonce, "daybreak_event_nonce");
    }

    #[test]
    fn partial_settings_fill_defaults() {
        let settings: SiteSettings =
            serde_json::from_str(r#"{"date_format": "Y-m-d"}"#).unwrap();
        assert_eq!(settings.date_format, "Y-m-d");
        assert_eq!(settings.post_type, DEFAULT_POST_TYPE);
        assert_eq!(settings.meta_keys().start_date, "nds_wp_event_start_date");
    }
}
