//! Quotes: references from a reply to the earlier message it answers.

use super::{FileInfo, MessageId, MessageType, OperatorId, Timestamp};
use serde::{Deserialize, Serialize};

/// How far the server has resolved a quoted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteState {
    /// The reply was sent by this client and the server has not filled the
    /// quote in yet.
    Pending,
    /// The server found the quoted message.
    Resolved,
    /// The quoted message could not be found or the state is unrecognised.
    Unknown,
}

impl QuoteState {
    /// Maps the wire state string; anything unrecognised is `Unknown`.
    #[must_use]
    pub fn from_wire(state: Option<&str>) -> Self {
        match state {
            Some("pending") => Self::Pending,
            Some("filled") => Self::Resolved,
            _ => Self::Unknown,
        }
    }
}

/// A quote of an earlier message.
///
/// Fields the quoted record did not carry stay `None`; a quote is never
/// padded with empty strings.
///
/// # Examples
///
/// ```
/// use palaver::message::domain::{MessageId, MessageType, Quote, QuoteState};
///
/// let quote = Quote::new(QuoteState::Resolved)
///     .with_message_id(MessageId::new("m0"))
///     .with_message_type(MessageType::Operator)
///     .with_text("hey");
/// assert_eq!(quote.text(), Some("hey"));
/// assert!(quote.attachment().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    state: QuoteState,
    #[serde(skip_serializing_if = "Option::is_none")]
    author_id: Option<OperatorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment: Option<FileInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_id: Option<MessageId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_type: Option<MessageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<Timestamp>,
}

impl Quote {
    /// Creates an empty quote in the given state.
    #[must_use]
    pub const fn new(state: QuoteState) -> Self {
        Self {
            state,
            author_id: None,
            attachment: None,
            message_id: None,
            message_type: None,
            sender_name: None,
            text: None,
            timestamp: None,
        }
    }

    /// Sets the operator who authored the quoted message.
    #[must_use]
    pub fn with_author_id(mut self, author_id: OperatorId) -> Self {
        self.author_id = Some(author_id);
        self
    }

    /// Sets the quoted file.
    #[must_use]
    pub fn with_attachment(mut self, attachment: FileInfo) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Sets the quoted message identifier.
    #[must_use]
    pub fn with_message_id(mut self, message_id: MessageId) -> Self {
        self.message_id = Some(message_id);
        self
    }

    /// Sets the quoted message type.
    #[must_use]
    pub const fn with_message_type(mut self, message_type: MessageType) -> Self {
        self.message_type = Some(message_type);
        self
    }

    /// Sets the quoted sender name.
    #[must_use]
    pub fn with_sender_name(mut self, sender_name: impl Into<String>) -> Self {
        self.sender_name = Some(sender_name.into());
        self
    }

    /// Sets the quoted text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the quoted message timestamp.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Returns the resolution state.
    #[must_use]
    pub const fn state(&self) -> QuoteState {
        self.state
    }

    /// Returns the author of the quoted message.
    #[must_use]
    pub const fn author_id(&self) -> Option<&OperatorId> {
        self.author_id.as_ref()
    }

    /// Returns the quoted file, present only when the quoted message was a
    /// file that could be resolved.
    #[must_use]
    pub const fn attachment(&self) -> Option<&FileInfo> {
        self.attachment.as_ref()
    }

    /// Returns the quoted message identifier.
    #[must_use]
    pub const fn message_id(&self) -> Option<&MessageId> {
        self.message_id.as_ref()
    }

    /// Returns the quoted message type.
    #[must_use]
    pub const fn message_type(&self) -> Option<MessageType> {
        self.message_type
    }

    /// Returns the quoted sender name.
    #[must_use]
    pub fn sender_name(&self) -> Option<&str> {
        self.sender_name.as_deref()
    }

    /// Returns the quoted text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the quoted message timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }
}
