use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::diag::{DiagnosticSink, TracingSink};
use crate::models::{ServiceIcon, WidgetViewModel};
use crate::render::TicketWidgetRenderer;
use crate::store::{WidgetDataStore, TICKET_DATA_KEY};

/// Host-assigned identifier of one placed widget instance.
pub type WidgetId = i32;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotValue {
    Text(String),
    Icon(ServiceIcon),
    Visible(bool),
}

/// One key→value update against a named slot of the fixed widget layout.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SlotUpdate {
    pub slot: &'static str,
    pub value: SlotValue,
}

impl SlotUpdate {
    fn text(slot: &'static str, value: impl Into<String>) -> Self {
        Self {
            slot,
            value: SlotValue::Text(value.into()),
        }
    }

    fn visible(slot: &'static str, visible: bool) -> Self {
        Self {
            slot,
            value: SlotValue::Visible(visible),
        }
    }
}

impl WidgetViewModel {
    /// Derives the update set the host commits, including the visibility
    /// ops for the tag container and its two optional slots.
    pub fn slot_updates(&self) -> Vec<SlotUpdate> {
        let mut updates = vec![
            SlotUpdate {
                slot: "service_icon",
                value: SlotValue::Icon(self.service_icon),
            },
            SlotUpdate::text("service_type", self.service_type.as_str()),
            SlotUpdate::text("primary_text", self.primary_text.as_str()),
            SlotUpdate::text("journey_date", self.journey_date.as_str()),
            SlotUpdate::text("journey_time", self.journey_time.as_str()),
            SlotUpdate::text("location", self.location.as_str()),
        ];

        if self.tags_visible {
            updates.push(SlotUpdate::visible("tags_container", true));
            if let Some(tag1) = &self.tag1 {
                updates.push(SlotUpdate::text("tag1", tag1.as_str()));
                updates.push(SlotUpdate::visible("tag1", true));
            }
            match &self.tag2 {
                Some(tag2) => {
                    updates.push(SlotUpdate::text("tag2", tag2.as_str()));
                    updates.push(SlotUpdate::visible("tag2", true));
                }
                None => updates.push(SlotUpdate::visible("tag2", false)),
            }
        } else {
            updates.push(SlotUpdate::visible("tags_container", false));
        }

        updates
    }
}

/// The host's view-update mechanism, kept behind a trait so the provider
/// never touches platform view APIs directly.
pub trait WidgetHost {
    fn update_widget(&mut self, widget_id: WidgetId, updates: &[SlotUpdate]) -> Result<()>;
}

/// Entry point the widget host drives: one synchronous callback per update
/// broadcast, looping the active instances sequentially. Host failures are
/// logged and absorbed so a bad instance never breaks the update cycle.
pub struct TicketWidgetProvider {
    store: WidgetDataStore,
    renderer: TicketWidgetRenderer,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for TicketWidgetProvider {
    fn default() -> Self {
        Self::new(WidgetDataStore::open_default(), Arc::new(TracingSink))
    }
}

impl TicketWidgetProvider {
    pub fn new(store: WidgetDataStore, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            store,
            renderer: TicketWidgetRenderer::new(sink.clone()),
            sink,
        }
    }

    pub fn on_update(&self, host: &mut dyn WidgetHost, widget_ids: &[WidgetId]) {
        let raw = self.store.get(TICKET_DATA_KEY);

        for &widget_id in widget_ids {
            let view = self.renderer.render(raw.as_deref());
            if let Err(err) = host.update_widget(widget_id, &view.slot_updates()) {
                self.sink
                    .error(&format!("widget {widget_id} update failed: {err}"));
            }
        }
    }

    pub fn on_enabled(&self) {
        self.sink.debug("first widget instance placed");
    }

    pub fn on_disabled(&self) {
        self.sink.debug("last widget instance removed");
    }
}
