//! Error types for message normalization.
//!
//! Uses `thiserror` for ergonomic error handling with typed variants
//! that can be inspected by callers. None of these are fatal: a failed
//! record is dropped and the rest of the batch carries on.

use super::domain::MessageKind;
use std::fmt;
use thiserror::Error;

/// A field a record must carry to become a canonical message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// The kind discriminator.
    Kind,
    /// The message body.
    Text,
    /// The client-side identifier.
    Id,
    /// The sender's display name.
    SenderName,
    /// The send time.
    Timestamp,
}

impl RequiredField {
    /// Returns the field name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kind => "kind",
            Self::Text => "text",
            Self::Id => "client-side id",
            Self::SenderName => "sender name",
            Self::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a raw record is rejected by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    /// A required field is absent.
    #[error("record has no {0}")]
    MissingField(RequiredField),

    /// The kind is not one the client knows how to show.
    #[error("unsupported message kind: {0}")]
    UnsupportedKind(String),

    /// The record is an internal control record.
    #[error("control record of kind {0} is not a message")]
    ControlRecord(MessageKind),

    /// A file record arrived while no session was bound.
    #[error("file message cannot be resolved without an active session")]
    NoSession,

    /// A file record's attachment could not be resolved.
    #[error("attachment resolution failed: {0}")]
    Attachment(#[from] AttachmentError),

    /// A quote references a file message but carries no descriptor text.
    #[error("quoted file message has no text")]
    QuotedFileWithoutText,
}

impl NormalizationError {
    /// Returns `true` for rejections that are expected and not worth logging.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::ControlRecord(_))
    }

    /// Returns the missing field for [`Self::MissingField`] rejections.
    #[must_use]
    pub const fn missing_field(&self) -> Option<RequiredField> {
        match self {
            Self::MissingField(field) => Some(*field),
            _ => None,
        }
    }
}

/// Failures resolving a file descriptor into an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    /// The body is not a recognisable descriptor.
    #[error("malformed attachment descriptor: {0}")]
    Malformed(String),

    /// The descriptor has no file name.
    #[error("attachment descriptor has no file name")]
    MissingFileName,

    /// The descriptor has no storage guid.
    #[error("attachment descriptor has no guid")]
    MissingGuid,

    /// The server URL cannot be parsed or cannot carry a path.
    #[error("invalid server URL '{0}'")]
    InvalidServerUrl(String),

    /// The session could not sign the download link.
    #[error("cannot sign download link: {0}")]
    Signing(String),
}

impl AttachmentError {
    /// Creates a malformed descriptor error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Creates a signing error.
    #[must_use]
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing(message.into())
    }
}

/// Failure parsing a keyboard or keyboard answer payload.
///
/// Never rejects a message; the payload is simply left out.
#[derive(Debug, Error)]
#[error("malformed {kind} payload: {source}")]
pub struct KeyboardParseError {
    /// The record kind whose payload was being parsed.
    pub kind: MessageKind,
    /// The underlying decoding error.
    #[source]
    pub source: serde_json::Error,
}
