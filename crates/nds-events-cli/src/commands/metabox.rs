//! Event details meta box commands.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use tracing::info;

use nds_events_core::MetaBoxForm;
use nds_events_core::metabox;

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Renders the meta box for an event with the given post meta.
pub fn show(
    id: u64,
    meta: &HashMap<String, String>,
    nonce: &str,
    now: Option<i64>,
    config: &Config,
) -> CliResult<String> {
    let now = match now {
        Some(secs) => DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| CliError::Input(format!("timestamp out of range: {}", secs)))?,
        None => Utc::now(),
    };
    let form = MetaBoxForm::from_meta(id, meta, now, &config.site)?;
    Ok(metabox::render(&form, nonce, &config.site)?)
}

/// Reads a submitted meta box and prints the post meta to store as JSON.
pub fn save(
    id: u64,
    submitted: &HashMap<String, String>,
    nonce: &str,
    config: &Config,
) -> CliResult<String> {
    let meta: BTreeMap<String, String> = metabox::save(id, submitted, nonce, &config.site)?
        .into_iter()
        .collect();
    info!(event_id = id, fields = meta.len(), "meta box saved");
    serde_json::to_string_pretty(&meta)
        .map_err(|e| CliError::Input(format!("failed to serialize meta: {}", e)))
}
