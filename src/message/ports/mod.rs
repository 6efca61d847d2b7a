//! Port trait definitions for the message subsystem.
//!
//! Ports define the abstract interfaces that normalization requires from
//! the surrounding client runtime. Adapters implement these ports.

pub mod diagnostics;
pub mod session;

pub use diagnostics::{Diagnostic, DiagnosticLevel, DiagnosticsSink};
pub use session::SessionContext;
