use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_PRIMARY_TEXT: &str = "No Route Info";
pub const DEFAULT_SECONDARY_TEXT: &str = "Service";
pub const DEFAULT_LOCATION: &str = "Unknown";
pub const APP_NAME: &str = "Ticket Wallet";

/// Icon asset selected for the widget header, one per service category.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServiceIcon {
    Bus,
    Train,
    Event,
    Info,
}

impl ServiceIcon {
    /// Maps the record's free-form `type` tag onto the fixed icon set.
    /// Unknown categories render as a generic event.
    pub fn for_type(ticket_type: &str) -> Self {
        match ticket_type.to_lowercase().as_str() {
            "busticket" | "bus" => ServiceIcon::Bus,
            "trainticket" | "train" => ServiceIcon::Train,
            _ => ServiceIcon::Event,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TagEntry {
    pub value: String,
}

/// The decoded ticket record, default-filled during extraction. Produced and
/// owned by the wallet app; the widget side only ever reads it. Tag and
/// extra sequences stay raw here: entries are only coerced once the render
/// path decides which list it will actually show.
#[derive(Clone, Debug, PartialEq)]
pub struct TicketRecord {
    pub primary_text: String,
    pub secondary_text: String,
    pub ticket_type: String,
    pub location: String,
    pub start_time: String,
    pub tags: Option<Vec<Value>>,
    pub extras: Option<Vec<Value>>,
}

/// Normalized view state for the fixed widget layout. Always displayable:
/// rendering ends in exactly one of the normal, empty, or error shapes.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct WidgetViewModel {
    pub service_icon: ServiceIcon,
    pub service_type: String,
    pub primary_text: String,
    pub journey_date: String,
    pub journey_time: String,
    pub location: String,
    pub tags_visible: bool,
    pub tag1: Option<String>,
    pub tag2: Option<String>,
}

impl WidgetViewModel {
    pub fn empty() -> Self {
        Self {
            service_icon: ServiceIcon::Event,
            service_type: APP_NAME.to_string(),
            primary_text: "No tickets available".to_string(),
            journey_date: "--".to_string(),
            journey_time: "--".to_string(),
            location: "Add tickets in app".to_string(),
            tags_visible: false,
            tag1: None,
            tag2: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            service_icon: ServiceIcon::Info,
            service_type: "Error".to_string(),
            primary_text: message.to_string(),
            journey_date: "--".to_string(),
            journey_time: "--".to_string(),
            location: "Please check app".to_string(),
            tags_visible: false,
            tag1: None,
            tag2: None,
        }
    }
}
