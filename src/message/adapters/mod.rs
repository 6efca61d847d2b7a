//! Adapter implementations for message ports.

pub mod signed_session;
pub mod tracing_diagnostics;

pub use signed_session::{SignedSession, SignedSessionConfig};
pub use tracing_diagnostics::TracingDiagnostics;
