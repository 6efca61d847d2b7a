//! Diagnostics port.
//!
//! Normalization never fails loudly. Every rejection and every degraded
//! payload is reported here instead, so operators can see why a message
//! did not show up.

use crate::message::error::{KeyboardParseError, NormalizationError};
use std::fmt;
use std::sync::Arc;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Something was left out but the message survived.
    Info,
    /// A record was rejected.
    Warning,
}

/// A single event emitted while normalizing a record.
#[derive(Debug)]
pub enum Diagnostic {
    /// The record was dropped.
    Rejected {
        /// Identifier of the record, when it had one.
        message_id: Option<String>,
        /// Why the record was dropped.
        error: NormalizationError,
    },
    /// A keyboard or keyboard answer payload was malformed and left out.
    KeyboardDiscarded {
        /// Identifier of the record, when it had one.
        message_id: Option<String>,
        /// The parse failure.
        error: KeyboardParseError,
    },
    /// A quoted file could not be resolved; the quote was kept without it.
    QuoteAttachmentDiscarded {
        /// Identifier of the quoting record, when it had one.
        message_id: Option<String>,
        /// Why the quoted file was left out.
        reason: NormalizationError,
    },
}

impl Diagnostic {
    /// Returns the severity of this diagnostic.
    #[must_use]
    pub const fn level(&self) -> DiagnosticLevel {
        match self {
            Self::Rejected { .. } => DiagnosticLevel::Warning,
            Self::KeyboardDiscarded { .. } | Self::QuoteAttachmentDiscarded { .. } => {
                DiagnosticLevel::Info
            }
        }
    }

    /// Returns the identifier of the record concerned.
    #[must_use]
    pub fn message_id(&self) -> Option<&str> {
        match self {
            Self::Rejected { message_id, .. }
            | Self::KeyboardDiscarded { message_id, .. }
            | Self::QuoteAttachmentDiscarded { message_id, .. } => message_id.as_deref(),
        }
    }

    /// Returns the rejection error for [`Self::Rejected`] diagnostics.
    #[must_use]
    pub const fn rejection(&self) -> Option<&NormalizationError> {
        match self {
            Self::Rejected { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { error, .. } => write!(f, "message rejected: {error}"),
            Self::KeyboardDiscarded { error, .. } => write!(f, "keyboard discarded: {error}"),
            Self::QuoteAttachmentDiscarded { reason, .. } => {
                write!(f, "quoted attachment discarded: {reason}")
            }
        }
    }
}

/// Port receiving normalization diagnostics.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticsSink: Send + Sync {
    /// Records one diagnostic. The sink's outcome never affects mapping.
    fn emit(&self, diagnostic: &Diagnostic);
}

impl<T: DiagnosticsSink + ?Sized> DiagnosticsSink for Arc<T> {
    fn emit(&self, diagnostic: &Diagnostic) {
        (**self).emit(diagnostic);
    }
}
