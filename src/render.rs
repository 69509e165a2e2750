use std::sync::Arc;

use thiserror::Error;

use crate::datetime;
use crate::decode::{self, DecodeError};
use crate::diag::{DiagnosticSink, TracingSink};
use crate::models::{ServiceIcon, TicketRecord, WidgetViewModel};

pub const PARSE_ERROR_MESSAGE: &str = "Error parsing ticket data";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("field extraction failed: {0}")]
    FieldExtraction(#[from] DecodeError),
}

/// Turns the raw blob handed over by the wallet app into a displayable view
/// model. Pure and idempotent; every failure is absorbed into one of the
/// three terminal states.
pub struct TicketWidgetRenderer {
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for TicketWidgetRenderer {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl TicketWidgetRenderer {
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    pub fn render(&self, raw_blob: Option<&str>) -> WidgetViewModel {
        let raw = match raw_blob {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => {
                self.sink.debug("no ticket data present, rendering empty state");
                return WidgetViewModel::empty();
            }
        };

        match self.render_blob(raw) {
            Ok(view) => view,
            Err(err) => {
                self.sink.error(&format!("failed to render ticket data: {err}"));
                WidgetViewModel::error(PARSE_ERROR_MESSAGE)
            }
        }
    }

    fn render_blob(&self, raw: &str) -> Result<WidgetViewModel, RenderError> {
        match decode::decode_envelope(raw) {
            Some((strategy, object)) => {
                self.sink
                    .debug(&format!("decoded ticket envelope via {strategy} strategy"));
                let record = decode::record_from_object(&object);
                let slots = resolve_tags(&record)?;
                Ok(view_from_record(&record, slots))
            }
            None => {
                self.sink
                    .warn("all envelope decoders failed, extracting fields manually");
                let record = decode::extract_manual(raw);
                // Manual recovery never resurfaces tags.
                Ok(view_from_record(&record, TagSlots::hidden()))
            }
        }
    }
}

struct TagSlots {
    visible: bool,
    tag1: Option<String>,
    tag2: Option<String>,
}

impl TagSlots {
    fn hidden() -> Self {
        Self {
            visible: false,
            tag1: None,
            tag2: None,
        }
    }
}

// Tags win over extras when both carry entries; only the first two render.
fn resolve_tags(record: &TicketRecord) -> Result<TagSlots, DecodeError> {
    let entries = match decode::selected_tag_entries(record)? {
        Some(entries) => entries,
        None => return Ok(TagSlots::hidden()),
    };

    Ok(TagSlots {
        visible: true,
        tag1: entries.first().map(|entry| entry.value.clone()),
        tag2: entries.get(1).map(|entry| entry.value.clone()),
    })
}

fn view_from_record(record: &TicketRecord, slots: TagSlots) -> WidgetViewModel {
    let (journey_date, journey_time) = datetime::parse_start_time(&record.start_time);

    WidgetViewModel {
        service_icon: ServiceIcon::for_type(&record.ticket_type),
        service_type: record.secondary_text.clone(),
        primary_text: record.primary_text.clone(),
        journey_date,
        journey_time,
        location: record.location.clone(),
        tags_visible: slots.visible,
        tag1: slots.tag1,
        tag2: slots.tag2,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::diag::capture::CaptureSink;

    const BUS_TICKET: &str = r#"{
        "primaryText": "Majestic - Electronic City",
        "secondaryText": "BMTC Volvo",
        "type": "bus",
        "location": "Platform 4",
        "startTime": "2024-03-15T10:30:00.000Z",
        "tags": [{"value": "AC"}, {"value": "Seat 12A"}]
    }"#;

    fn renderer() -> (TicketWidgetRenderer, Arc<CaptureSink>) {
        let sink = Arc::new(CaptureSink::default());
        (TicketWidgetRenderer::new(sink.clone()), sink)
    }

    #[test]
    fn renders_a_well_formed_bus_ticket() {
        let (renderer, _) = renderer();
        let view = renderer.render(Some(BUS_TICKET));

        assert_eq!(view.service_icon, ServiceIcon::Bus);
        assert_eq!(view.service_type, "BMTC Volvo");
        assert_eq!(view.primary_text, "Majestic - Electronic City");
        assert_eq!(view.journey_date, "Mar 15, 2024");
        assert_eq!(view.journey_time, "10:30 AM");
        assert_eq!(view.location, "Platform 4");
        assert!(view.tags_visible);
        assert_eq!(view.tag1.as_deref(), Some("AC"));
        assert_eq!(view.tag2.as_deref(), Some("Seat 12A"));
    }

    #[test]
    fn absent_blob_renders_empty_state() {
        let (renderer, _) = renderer();
        assert_eq!(renderer.render(None), WidgetViewModel::empty());
    }

    #[test]
    fn blank_blob_renders_empty_state() {
        let (renderer, _) = renderer();
        assert_eq!(renderer.render(Some("")), WidgetViewModel::empty());
        assert_eq!(renderer.render(Some("   ")), WidgetViewModel::empty());
    }

    #[test]
    fn extras_fill_tag_slots_when_tags_are_empty() {
        let (renderer, _) = renderer();
        let view = renderer.render(Some(
            r#"{"type":"bus","tags":[],"extras":[{"value":"A"},{"value":"B"}]}"#,
        ));
        assert!(view.tags_visible);
        assert_eq!(view.tag1.as_deref(), Some("A"));
        assert_eq!(view.tag2.as_deref(), Some("B"));
    }

    #[test]
    fn single_tag_leaves_second_slot_hidden() {
        let (renderer, _) = renderer();
        let view = renderer.render(Some(r#"{"tags":[{"value":"Window"}]}"#));
        assert!(view.tags_visible);
        assert_eq!(view.tag1.as_deref(), Some("Window"));
        assert!(view.tag2.is_none());
    }

    #[test]
    fn null_tags_and_extras_hide_the_container() {
        let (renderer, _) = renderer();
        let view = renderer.render(Some(r#"{"type":"train","tags":null,"extras":null}"#));
        assert_eq!(view.service_icon, ServiceIcon::Train);
        assert!(!view.tags_visible);
        assert!(view.tag1.is_none());
        assert!(view.tag2.is_none());
    }

    #[test]
    fn escaped_envelope_still_renders_tags() {
        let (renderer, sink) = renderer();
        let escaped =
            r#"{\"primaryText\":\"Chennai Mail\",\"type\":\"trainticket\",\"tags\":[{\"value\":\"Sleeper\"}]}"#;
        let view = renderer.render(Some(escaped));

        assert_eq!(view.service_icon, ServiceIcon::Train);
        assert_eq!(view.primary_text, "Chennai Mail");
        assert!(view.tags_visible);
        assert_eq!(view.tag1.as_deref(), Some("Sleeper"));
        assert!(sink
            .lines()
            .iter()
            .any(|line| line.contains("unescape-quotes")));
    }

    #[test]
    fn garbage_blob_recovers_through_manual_extraction() {
        let (renderer, sink) = renderer();
        let mangled = r#"oops "primaryText": "Night Coach", "type": "bus" {{{"#;
        let view = renderer.render(Some(mangled));

        assert_eq!(view.primary_text, "Night Coach");
        assert_eq!(view.service_icon, ServiceIcon::Bus);
        assert_eq!(view.service_type, "Service");
        assert_eq!(view.journey_date, "--");
        assert!(!view.tags_visible, "manual recovery never shows tags");
        assert!(sink
            .lines()
            .iter()
            .any(|line| line.starts_with("warn:") && line.contains("manually")));
    }

    #[test]
    fn malformed_entry_past_the_second_tag_still_renders() {
        let (renderer, _) = renderer();
        let view = renderer.render(Some(
            r#"{"type":"bus","tags":[{"value":"A"},{"value":"B"},3]}"#,
        ));

        assert_eq!(view.service_icon, ServiceIcon::Bus);
        assert!(view.tags_visible);
        assert_eq!(view.tag1.as_deref(), Some("A"));
        assert_eq!(view.tag2.as_deref(), Some("B"));
    }

    #[test]
    fn malformed_extras_are_ignored_when_tags_render() {
        let (renderer, _) = renderer();
        let view = renderer.render(Some(
            r#"{"type":"bus","tags":[{"value":"A"}],"extras":["bad"]}"#,
        ));

        assert!(view.tags_visible);
        assert_eq!(view.tag1.as_deref(), Some("A"));
        assert!(view.tag2.is_none());
    }

    #[test]
    fn malformed_tag_entry_renders_error_state() {
        let (renderer, sink) = renderer();
        let view = renderer.render(Some(r#"{"type":"bus","tags":[42]}"#));

        assert_eq!(view, WidgetViewModel::error(PARSE_ERROR_MESSAGE));
        assert!(sink.lines().iter().any(|line| line.starts_with("error:")));
    }

    #[test]
    fn missing_fields_render_with_named_defaults() {
        let (renderer, _) = renderer();
        let view = renderer.render(Some("{}"));

        assert_eq!(view.service_icon, ServiceIcon::Bus);
        assert_eq!(view.service_type, "Service");
        assert_eq!(view.primary_text, "No Route Info");
        assert_eq!(view.journey_date, "--");
        assert_eq!(view.journey_time, "--");
        assert_eq!(view.location, "Unknown");
        assert!(!view.tags_visible);
    }

    #[test]
    fn rendering_is_idempotent() {
        let (renderer, _) = renderer();
        assert_eq!(
            renderer.render(Some(BUS_TICKET)),
            renderer.render(Some(BUS_TICKET))
        );
    }
}
