use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{
    TagEntry, TicketRecord, DEFAULT_LOCATION, DEFAULT_PRIMARY_TEXT, DEFAULT_SECONDARY_TEXT,
};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{list} entry {index} is not an object")]
    MalformedEntry { list: &'static str, index: usize },
}

/// A pure decode attempt over the raw blob; `None` means try the next one.
pub type DecodeStrategy = fn(&str) -> Option<Map<String, Value>>;

// The wallet app's bridge has shipped the blob plain, quote-escaped, and
// doubly escaped at various points. Ordered from least to most invasive.
pub const STRATEGIES: [(&'static str, DecodeStrategy); 3] = [
    ("direct", decode_direct),
    ("unescape-quotes", decode_unescaped_quotes),
    ("strip-escapes", decode_stripped),
];

static SCALAR_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(primaryText|secondaryText|type|location|startTime)"\s*:\s*"([^"]*)""#)
        .expect("scalar field regex")
});

/// Runs the decode strategies in order and returns the first envelope that
/// parses as a JSON object, tagged with the strategy that produced it.
pub fn decode_envelope(raw: &str) -> Option<(&'static str, Map<String, Value>)> {
    STRATEGIES
        .iter()
        .find_map(|(name, strategy)| strategy(raw).map(|object| (*name, object)))
}

fn decode_direct(raw: &str) -> Option<Map<String, Value>> {
    parse_object(raw)
}

fn decode_unescaped_quotes(raw: &str) -> Option<Map<String, Value>> {
    parse_object(&raw.trim().replace("\\\"", "\""))
}

fn decode_stripped(raw: &str) -> Option<Map<String, Value>> {
    parse_object(&raw.replace('\\', ""))
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Builds a default-filled record from a decoded envelope. Tag and extra
/// sequences are carried over raw; their entries are not inspected here.
pub fn record_from_object(object: &Map<String, Value>) -> TicketRecord {
    TicketRecord {
        primary_text: scalar_field(object, "primaryText", DEFAULT_PRIMARY_TEXT),
        secondary_text: scalar_field(object, "secondaryText", DEFAULT_SECONDARY_TEXT),
        ticket_type: scalar_field(object, "type", "bus"),
        location: scalar_field(object, "location", DEFAULT_LOCATION),
        start_time: scalar_field(object, "startTime", ""),
        tags: value_list(object, "tags"),
        extras: value_list(object, "extras"),
    }
}

/// Applies the tags-over-extras selection, then coerces only the entries the
/// widget will show. Entries past the second and the losing list are never
/// inspected, so a malformed value there cannot fail the render. `None`
/// means both sources are absent or empty and the container stays hidden.
pub fn selected_tag_entries(record: &TicketRecord) -> Result<Option<Vec<TagEntry>>, DecodeError> {
    let (list, items) = match (&record.tags, &record.extras) {
        (Some(tags), _) if !tags.is_empty() => ("tags", tags),
        (_, Some(extras)) if !extras.is_empty() => ("extras", extras),
        _ => return Ok(None),
    };

    let mut entries = Vec::with_capacity(2);
    for (index, item) in items.iter().take(2).enumerate() {
        let entry = item
            .as_object()
            .ok_or(DecodeError::MalformedEntry { list, index })?;
        entries.push(TagEntry {
            value: scalar_field(entry, "value", ""),
        });
    }
    Ok(Some(entries))
}

/// Last-resort recovery from a fully malformed envelope: pull the known
/// scalar fields out by pattern. Tags and extras are never recovered here.
pub fn extract_manual(raw: &str) -> TicketRecord {
    let mut primary_text = None;
    let mut secondary_text = None;
    let mut ticket_type = None;
    let mut location = None;
    let mut start_time = None;

    for captures in SCALAR_FIELD_RE.captures_iter(raw) {
        let value = captures[2].to_string();
        let slot = match &captures[1] {
            "primaryText" => &mut primary_text,
            "secondaryText" => &mut secondary_text,
            "type" => &mut ticket_type,
            "location" => &mut location,
            _ => &mut start_time,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    TicketRecord {
        primary_text: primary_text.unwrap_or_else(|| DEFAULT_PRIMARY_TEXT.to_string()),
        secondary_text: secondary_text.unwrap_or_else(|| DEFAULT_SECONDARY_TEXT.to_string()),
        ticket_type: ticket_type.unwrap_or_else(|| "event".to_string()),
        location: location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        start_time: start_time.unwrap_or_default(),
        tags: None,
        extras: None,
    }
}

fn scalar_field(object: &Map<String, Value>, key: &str, default: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

// A non-array value under these keys reads as absent.
fn value_list(object: &Map<String, Value>, key: &str) -> Option<Vec<Value>> {
    match object.get(key) {
        Some(Value::Array(items)) => Some(items.clone()),
        _ => None,
    }
}
