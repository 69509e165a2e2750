/// Diagnostic output for the render path. Injected into the renderer so
/// widget code never reaches for a global logger.
pub trait DiagnosticSink: Send + Sync {
    fn debug(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards diagnostics to the `tracing` facade.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "ticket_widget", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "ticket_widget", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "ticket_widget", "{message}");
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn debug(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}
