//! Diagnostics adapter that forwards to `tracing`.

use tracing::{info, warn};

use crate::message::ports::{Diagnostic, DiagnosticLevel, DiagnosticsSink};

/// Emits diagnostics as `tracing` events.
///
/// Rejections become `WARN` events, degraded payloads `INFO`. The crate
/// never installs a subscriber; the host application decides where these
/// events go.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn emit(&self, diagnostic: &Diagnostic) {
        let message_id = diagnostic.message_id().unwrap_or("-");
        let field = diagnostic
            .rejection()
            .and_then(|error| error.missing_field())
            .map(|field| field.as_str());
        match diagnostic.level() {
            DiagnosticLevel::Warning => warn!(message_id, field, "{diagnostic}"),
            DiagnosticLevel::Info => info!(message_id, "{diagnostic}"),
        }
    }
}
