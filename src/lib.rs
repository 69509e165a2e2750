//! Home-screen ticket widget renderer for the wallet app.

pub mod datetime;
pub mod decode;
pub mod diag;
pub mod models;
pub mod provider;
pub mod render;
pub mod store;

pub use diag::{DiagnosticSink, NullSink, TracingSink};
pub use models::{ServiceIcon, TagEntry, TicketRecord, WidgetViewModel};
pub use provider::{SlotUpdate, SlotValue, TicketWidgetProvider, WidgetHost, WidgetId};
pub use render::TicketWidgetRenderer;
pub use store::{WidgetDataStore, TICKET_DATA_KEY};
