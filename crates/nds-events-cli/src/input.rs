//! Event input.
//!
//! Events are read from a JSON array, either from a file or from stdin when
//! the path is `-`. Start and end are Unix timestamps, as in post meta.
//! Post meta and submitted meta box forms are flat JSON objects of strings.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use nds_events_core::Event;

use crate::error::{CliError, CliResult};

/// Reads events from `path`, or stdin if `path` is `-`.
pub fn load_events(path: &Path) -> CliResult<Vec<Event>> {
    let events = parse_events(&read_input(path)?)?;
    debug!(count = events.len(), path = %path.display(), "loaded events");
    Ok(events)
}

/// Reads a field map from `path`, or stdin if `path` is `-`.
pub fn load_fields(path: &Path) -> CliResult<HashMap<String, String>> {
    let fields = parse_fields(&read_input(path)?)?;
    debug!(count = fields.len(), path = %path.display(), "loaded fields");
    Ok(fields)
}

/// Parses a JSON object whose values are all strings.
pub fn parse_fields(content: &str) -> CliResult<HashMap<String, String>> {
    serde_json::from_str(content)
        .map_err(|e| CliError::Input(format!("failed to parse fields: {}", e)))
}

fn read_input(path: &Path) -> CliResult<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .map_err(|e| CliError::Input(format!("failed to read {}: {}", path.display(), e)))
}

/// Parses a JSON array of events, dropping events that end before they start.
pub fn parse_events(content: &str) -> CliResult<Vec<Event>> {
    let events: Vec<Event> = serde_json::from_str(content)
        .map_err(|e| CliError::Input(format!("failed to parse events: {}", e)))?;
    Ok(events
        .into_iter()
        .filter(|e| {
            let valid = e.end >= e.start;
            if !valid {
                warn!(event_id = e.id, "skipping event that ends before it starts");
            }
            valid
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_event_array() {
        let events = parse_events(
            r#"[
                {"id": 1, "title": "A", "start": 100, "end": 200},
                {"id": 2, "title": "B", "start": 300, "end": 300, "location": "Hall"}
            ]"#,
        )
        .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].location.as_deref(), Some("Hall"));
    }

    #[test]
    fn skips_inverted_events() {
        let events =
            parse_events(r#"[{"id": 1, "title": "A", "start": 200, "end": 100}]"#).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_events("{not json").unwrap_err();
        assert!(matches!(err, CliError::Input(ref msg) if msg.starts_with("failed to parse events")));
    }

    #[test]
    fn load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_events(&dir.path().join("events.json")).unwrap_err();
        assert!(err.to_string().starts_with("input error: failed to read"));
    }

    #[test]
    fn parses_field_map() {
        let fields = parse_fields(r#"{"nds_wp_event_location": "Hall", "nds_wp_event_url": ""}"#)
            .unwrap();
        assert_eq!(fields["nds_wp_event_location"], "Hall");
        assert_eq!(fields["nds_wp_event_url"], "");

        let err = parse_fields(r#"{"nds_wp_event_start_date": 1393871400}"#).unwrap_err();
        assert!(matches!(err, CliError::Input(ref msg) if msg.starts_with("failed to parse fields")));
    }

    #[test]
    fn load_fields_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.json");
        std::fs::write(&path, r#"{"nds_wp_event_start_date": "1393871400"}"#).unwrap();
        assert_eq!(load_fields(&path).unwrap().len(), 1);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, r#"[{"id": 5, "title": "E", "start": 0, "end": 0}]"#).unwrap();
        let events = load_events(&path).unwrap();
        assert_eq!(events[0].id, 5);
    }
}
