use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ticket_widget::{
    SlotUpdate, SlotValue, TicketWidgetProvider, TicketWidgetRenderer, TracingSink, WidgetDataStore,
    WidgetHost, WidgetId, TICKET_DATA_KEY,
};

/// Renders the stored ticket blob the way the home-screen widget would.
#[derive(Parser)]
#[command(name = "widget-preview")]
struct Cli {
    /// Path to the shared widget data file (defaults to the platform store)
    #[arg(long)]
    data: Option<PathBuf>,
    /// Print the view model as JSON instead of slot updates
    #[arg(long)]
    json: bool,
}

struct StdoutHost;

impl WidgetHost for StdoutHost {
    fn update_widget(&mut self, widget_id: WidgetId, updates: &[SlotUpdate]) -> Result<()> {
        println!("widget {widget_id}:");
        for update in updates {
            match &update.value {
                SlotValue::Text(text) => println!("  {:<16} {text}", update.slot),
                SlotValue::Icon(icon) => println!("  {:<16} {icon:?}", update.slot),
                SlotValue::Visible(visible) => {
                    let state = if *visible { "visible" } else { "hidden" };
                    println!("  {:<16} {state}", update.slot);
                }
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let store = cli
        .data
        .map(WidgetDataStore::at)
        .unwrap_or_else(WidgetDataStore::open_default);
    let sink = Arc::new(TracingSink);

    if cli.json {
        let renderer = TicketWidgetRenderer::new(sink);
        let raw = store.get(TICKET_DATA_KEY);
        println!("{}", serde_json::to_string_pretty(&renderer.render(raw.as_deref()))?);
    } else {
        let provider = TicketWidgetProvider::new(store, sink);
        provider.on_update(&mut StdoutHost, &[0]);
    }

    Ok(())
}
