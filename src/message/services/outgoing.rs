//! Construction of messages the visitor is about to send.
//!
//! Outgoing messages are built straight from user intent; no raw record is
//! involved. The sender name stays empty until the server acknowledges the
//! message and echoes it back.

use mockable::Clock;

use crate::message::domain::{
    Message, MessageBuilder, MessageData, MessageId, MessageOrigin, MessageType, Quote,
    QuoteState, Timestamp,
};

/// Builds outgoing messages stamped with the current time.
///
/// # Examples
///
/// ```
/// use palaver::message::domain::{MessageId, MessageType};
/// use palaver::message::services::OutgoingMessageFactory;
/// use mockable::DefaultClock;
///
/// let factory = OutgoingMessageFactory::new("https://chat.example.com", DefaultClock);
/// let message = factory.text_message(MessageId::new("m1"), "hi");
///
/// assert_eq!(message.message_type(), MessageType::Visitor);
/// assert_eq!(message.sender_name(), "");
/// ```
#[derive(Debug, Clone)]
pub struct OutgoingMessageFactory<C: Clock> {
    server_url: String,
    clock: C,
}

impl<C: Clock> OutgoingMessageFactory<C> {
    /// Creates a factory for the given server.
    #[must_use]
    pub fn new(server_url: impl Into<String>, clock: C) -> Self {
        Self {
            server_url: server_url.into(),
            clock,
        }
    }

    /// Builds a plain text message.
    #[must_use]
    pub fn text_message(&self, id: MessageId, text: impl Into<String>) -> Message {
        self.unsent(id, MessageType::Visitor, text).build()
    }

    /// Builds a text message replying to `quoted`.
    ///
    /// The quote stays pending until the server fills it in, but already
    /// mirrors what the visitor sees of the quoted message.
    #[must_use]
    pub fn text_message_with_quote(
        &self,
        id: MessageId,
        text: impl Into<String>,
        quoted: &Message,
    ) -> Message {
        let mut quote = Quote::new(QuoteState::Pending)
            .with_message_id(quoted.id().clone())
            .with_message_type(quoted.message_type())
            .with_sender_name(quoted.sender_name())
            .with_text(quoted.text())
            .with_timestamp(quoted.timestamp());
        if let Some(file) = quoted.attachment() {
            quote = quote.with_attachment(file.clone());
        }
        self.unsent(id, MessageType::Visitor, text)
            .with_quote(quote)
            .build()
    }

    /// Builds a placeholder for a file the visitor is uploading.
    #[must_use]
    pub fn file_message(&self, id: MessageId) -> Message {
        self.unsent(id, MessageType::FileFromVisitor, "")
            .with_message_data(MessageData::uploading())
            .build()
    }

    fn unsent(
        &self,
        id: MessageId,
        message_type: MessageType,
        text: impl Into<String>,
    ) -> MessageBuilder {
        Message::builder(
            self.server_url.as_str(),
            id,
            "",
            message_type,
            text,
            Timestamp::from_datetime(self.clock.utc()),
        )
        .with_origin(MessageOrigin::Live)
        .with_read(false)
    }
}
