//! The canonical chat message.
//!
//! Messages are immutable after construction. The fields every consumer
//! relies on (identifier, sender name, type, display text, timestamp) are
//! required by [`Message::builder`], so a message missing one of them
//! cannot be built.

use super::{
    FileInfo, Keyboard, KeyboardRequest, MessageData, MessageId, MessageType, OperatorId, Quote,
    Timestamp,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Where a message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOrigin {
    /// Delivered over the live chat connection.
    Live,
    /// Loaded from message history.
    History,
}

impl MessageOrigin {
    /// Returns `true` for history messages.
    #[must_use]
    pub const fn is_history(self) -> bool {
        matches!(self, Self::History)
    }
}

/// Interactive payload of a message. A message carries at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KeyboardPayload {
    /// A keyboard offered by a bot.
    Keyboard(Keyboard),
    /// The visitor's answer to a keyboard.
    Request(KeyboardRequest),
}

/// A validated chat message.
///
/// # Invariants
///
/// - `id`, `sender_name`, `text` and `timestamp` are always present
/// - file messages show the file name as `text` and keep the original body
///   in `raw_text`; other messages leave `raw_text` unset
/// - at most one of keyboard and keyboard request is set
///
/// # Examples
///
/// ```
/// use palaver::message::domain::{Message, MessageId, MessageType, Timestamp};
///
/// let message = Message::builder(
///     "https://chat.example.com",
///     MessageId::new("m1"),
///     "Alice",
///     MessageType::Operator,
///     "Hello!",
///     Timestamp::from_micros(1_700_000_000_000_000),
/// )
/// .build();
///
/// assert_eq!(message.text(), "Hello!");
/// assert!(message.is_read());
/// assert!(message.raw_text().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    server_url: String,
    id: MessageId,
    storage_id: Option<String>,
    operator_id: Option<OperatorId>,
    avatar: Option<String>,
    sender_name: String,
    message_type: MessageType,
    data: Option<Value>,
    message_data: Option<MessageData>,
    text: String,
    raw_text: Option<String>,
    timestamp: Timestamp,
    is_history: bool,
    read: bool,
    can_be_edited: bool,
    can_be_replied: bool,
    quote: Option<Quote>,
    keyboard: Option<KeyboardPayload>,
}

impl Message {
    /// Starts building a message from its required fields.
    #[must_use]
    pub fn builder(
        server_url: impl Into<String>,
        id: MessageId,
        sender_name: impl Into<String>,
        message_type: MessageType,
        text: impl Into<String>,
        timestamp: Timestamp,
    ) -> MessageBuilder {
        MessageBuilder {
            message: Self {
                server_url: server_url.into(),
                id,
                storage_id: None,
                operator_id: None,
                avatar: None,
                sender_name: sender_name.into(),
                message_type,
                data: None,
                message_data: None,
                text: text.into(),
                raw_text: None,
                timestamp,
                is_history: false,
                read: true,
                can_be_edited: false,
                can_be_replied: false,
                quote: None,
                keyboard: None,
            },
        }
    }

    /// Returns the server URL this message belongs to.
    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Returns the client-side identifier.
    #[must_use]
    pub const fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the server storage identifier, if assigned.
    #[must_use]
    pub fn storage_id(&self) -> Option<&str> {
        self.storage_id.as_deref()
    }

    /// Returns the authoring operator, if any.
    #[must_use]
    pub const fn operator_id(&self) -> Option<&OperatorId> {
        self.operator_id.as_ref()
    }

    /// Returns the raw avatar reference.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Resolves the avatar reference against the server URL.
    ///
    /// Returns `None` when there is no avatar or either part is not a valid
    /// URL.
    #[must_use]
    pub fn avatar_url(&self) -> Option<Url> {
        let avatar = self.avatar.as_deref()?;
        Url::parse(&self.server_url).ok()?.join(avatar).ok()
    }

    /// Returns the sender's display name. Empty for unsent messages.
    #[must_use]
    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    /// Returns the canonical message type.
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// Returns the opaque structured payload as received.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Returns typed message data for file messages.
    #[must_use]
    pub const fn message_data(&self) -> Option<&MessageData> {
        self.message_data.as_ref()
    }

    /// Returns the attached file, if resolved.
    #[must_use]
    pub fn attachment(&self) -> Option<&FileInfo> {
        self.message_data.as_ref().and_then(MessageData::file)
    }

    /// Returns the display text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the original body of a file message.
    #[must_use]
    pub fn raw_text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }

    /// Returns the send time.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Returns `true` if the message was loaded from history.
    #[must_use]
    pub const fn is_history(&self) -> bool {
        self.is_history
    }

    /// Returns `true` if the message has been read.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Returns `true` if the visitor may edit the message.
    #[must_use]
    pub const fn can_be_edited(&self) -> bool {
        self.can_be_edited
    }

    /// Returns `true` if the visitor may reply to the message.
    #[must_use]
    pub const fn can_be_replied(&self) -> bool {
        self.can_be_replied
    }

    /// Returns the quoted message, if this is a reply.
    #[must_use]
    pub const fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    /// Returns the keyboard offered by this message.
    #[must_use]
    pub const fn keyboard(&self) -> Option<&Keyboard> {
        match &self.keyboard {
            Some(KeyboardPayload::Keyboard(keyboard)) => Some(keyboard),
            _ => None,
        }
    }

    /// Returns the keyboard answer carried by this message.
    #[must_use]
    pub const fn keyboard_request(&self) -> Option<&KeyboardRequest> {
        match &self.keyboard {
            Some(KeyboardPayload::Request(request)) => Some(request),
            _ => None,
        }
    }
}

/// Builder for the optional parts of a [`Message`].
#[derive(Debug)]
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    /// Sets the server storage identifier.
    #[must_use]
    pub fn with_storage_id(mut self, storage_id: impl Into<String>) -> Self {
        self.message.storage_id = Some(storage_id.into());
        self
    }

    /// Sets the authoring operator.
    #[must_use]
    pub fn with_operator_id(mut self, operator_id: OperatorId) -> Self {
        self.message.operator_id = Some(operator_id);
        self
    }

    /// Sets the avatar reference.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.message.avatar = Some(avatar.into());
        self
    }

    /// Sets the opaque structured payload.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.message.data = Some(data);
        self
    }

    /// Sets typed message data.
    #[must_use]
    pub fn with_message_data(mut self, message_data: MessageData) -> Self {
        self.message.message_data = Some(message_data);
        self
    }

    /// Keeps the original body of a file message.
    #[must_use]
    pub fn with_raw_text(mut self, raw_text: impl Into<String>) -> Self {
        self.message.raw_text = Some(raw_text.into());
        self
    }

    /// Marks where the message came from.
    #[must_use]
    pub const fn with_origin(mut self, origin: MessageOrigin) -> Self {
        self.message.is_history = origin.is_history();
        self
    }

    /// Sets the read flag.
    #[must_use]
    pub const fn with_read(mut self, read: bool) -> Self {
        self.message.read = read;
        self
    }

    /// Sets whether the visitor may edit the message.
    #[must_use]
    pub const fn with_can_be_edited(mut self, can_be_edited: bool) -> Self {
        self.message.can_be_edited = can_be_edited;
        self
    }

    /// Sets whether the visitor may reply to the message.
    #[must_use]
    pub const fn with_can_be_replied(mut self, can_be_replied: bool) -> Self {
        self.message.can_be_replied = can_be_replied;
        self
    }

    /// Attaches a quote.
    #[must_use]
    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.message.quote = Some(quote);
        self
    }

    /// Attaches a keyboard or keyboard answer, replacing any previous one.
    #[must_use]
    pub fn with_keyboard_payload(mut self, payload: KeyboardPayload) -> Self {
        self.message.keyboard = Some(payload);
        self
    }

    /// Finishes the message.
    #[must_use]
    pub fn build(self) -> Message {
        self.message
    }
}
