use std::{fs, path::PathBuf};

use once_cell::sync::Lazy;
use serde_json::Value;

/// Key the wallet app writes the serialized ticket record under.
pub const TICKET_DATA_KEY: &str = "ticket_data";

static DATA_ROOT: Lazy<PathBuf> = Lazy::new(|| {
    let base = dirs::data_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    base.join("ticket-wallet")
});

pub fn widget_data_path() -> PathBuf {
    DATA_ROOT.join("widget_data.json")
}

/// Read-only view of the shared key-value blob the wallet app hands over to
/// widget code. The app owns the file; the widget side never writes it.
pub struct WidgetDataStore {
    path: PathBuf,
}

impl WidgetDataStore {
    pub fn open_default() -> Self {
        Self {
            path: widget_data_path(),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Looks up one key. String values come back verbatim; any other value
    /// the app bridge stored is coerced to its JSON text, the same way the
    /// host hands widgets whatever object landed in shared storage.
    pub fn get(&self, key: &str) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let blob: Value = serde_json::from_str(&contents).ok()?;
        match blob.get(key)? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}
