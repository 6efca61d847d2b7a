//! Wire-level message kinds and the canonical message types exposed to
//! consumers.
//!
//! The backend tags every record with a kind string. Two kinds are internal
//! control records and never surface as messages; every other kind has
//! exactly one canonical [`MessageType`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of record kinds understood on the wire.
///
/// # Examples
///
/// ```
/// use palaver::message::domain::{MessageKind, MessageType};
///
/// let kind: MessageKind = "file_operator".parse().expect("known kind");
/// assert_eq!(kind.message_type(), Some(MessageType::FileFromOperator));
///
/// let control: MessageKind = "for_operator".parse().expect("known kind");
/// assert!(control.is_control());
/// assert_eq!(control.message_type(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A request for the visitor to perform an action.
    ActionRequest,
    /// A request for the visitor's contact details.
    #[serde(rename = "contacts_request")]
    ContactInformationRequest,
    /// A file sent by an operator.
    #[serde(rename = "file_operator")]
    FileFromOperator,
    /// A file sent by the visitor.
    #[serde(rename = "file_visitor")]
    FileFromVisitor,
    /// A system information line.
    Info,
    /// An interactive keyboard offered by a bot.
    Keyboard,
    /// The visitor's answer to a keyboard.
    KeyboardResponse,
    /// A text message from an operator.
    Operator,
    /// Notice that all operators are busy.
    OperatorBusy,
    /// A text message from the visitor.
    Visitor,
    /// Contact details submitted by the visitor. Control record.
    #[serde(rename = "contacts")]
    ContactInformation,
    /// A note addressed to operators only. Control record.
    ForOperator,
}

impl MessageKind {
    /// Every kind, in wire-table order.
    pub const ALL: [Self; 12] = [
        Self::ActionRequest,
        Self::ContactInformationRequest,
        Self::FileFromOperator,
        Self::FileFromVisitor,
        Self::Info,
        Self::Keyboard,
        Self::KeyboardResponse,
        Self::Operator,
        Self::OperatorBusy,
        Self::Visitor,
        Self::ContactInformation,
        Self::ForOperator,
    ];

    /// Returns the wire representation of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ActionRequest => "action_request",
            Self::ContactInformationRequest => "contacts_request",
            Self::FileFromOperator => "file_operator",
            Self::FileFromVisitor => "file_visitor",
            Self::Info => "info",
            Self::Keyboard => "keyboard",
            Self::KeyboardResponse => "keyboard_response",
            Self::Operator => "operator",
            Self::OperatorBusy => "operator_busy",
            Self::Visitor => "visitor",
            Self::ContactInformation => "contacts",
            Self::ForOperator => "for_operator",
        }
    }

    /// Returns `true` for internal records that are never shown to users.
    #[must_use]
    pub const fn is_control(self) -> bool {
        matches!(self, Self::ContactInformation | Self::ForOperator)
    }

    /// Returns `true` for kinds whose body encodes a file attachment.
    #[must_use]
    pub const fn is_file(self) -> bool {
        matches!(self, Self::FileFromOperator | Self::FileFromVisitor)
    }

    /// Maps this kind to its canonical type, or `None` for control records.
    #[must_use]
    pub const fn message_type(self) -> Option<MessageType> {
        let message_type = match self {
            Self::ActionRequest => MessageType::ActionRequest,
            Self::ContactInformationRequest => MessageType::ContactInformationRequest,
            Self::FileFromOperator => MessageType::FileFromOperator,
            Self::FileFromVisitor => MessageType::FileFromVisitor,
            Self::Info => MessageType::Info,
            Self::Keyboard => MessageType::Keyboard,
            Self::KeyboardResponse => MessageType::KeyboardResponse,
            Self::Operator => MessageType::Operator,
            Self::OperatorBusy => MessageType::OperatorBusy,
            Self::Visitor => MessageType::Visitor,
            Self::ContactInformation | Self::ForOperator => return None,
        };
        Some(message_type)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised message kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message kind: {0}")]
pub struct ParseMessageKindError(pub String);

impl FromStr for MessageKind {
    type Err = ParseMessageKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseMessageKindError(s.to_owned()))
    }
}

/// The user-visible message types.
///
/// This is [`MessageKind`] without the control records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// A request for the visitor to perform an action.
    ActionRequest,
    /// A request for the visitor's contact details.
    #[serde(rename = "contacts_request")]
    ContactInformationRequest,
    /// A file sent by an operator.
    #[serde(rename = "file_operator")]
    FileFromOperator,
    /// A file sent by the visitor.
    #[serde(rename = "file_visitor")]
    FileFromVisitor,
    /// A system information line.
    Info,
    /// An interactive keyboard offered by a bot.
    Keyboard,
    /// The visitor's answer to a keyboard.
    KeyboardResponse,
    /// A text message from an operator.
    Operator,
    /// Notice that all operators are busy.
    OperatorBusy,
    /// A text message from the visitor.
    Visitor,
}

impl MessageType {
    /// Returns the wire kind this type originates from.
    #[must_use]
    pub const fn kind(self) -> MessageKind {
        match self {
            Self::ActionRequest => MessageKind::ActionRequest,
            Self::ContactInformationRequest => MessageKind::ContactInformationRequest,
            Self::FileFromOperator => MessageKind::FileFromOperator,
            Self::FileFromVisitor => MessageKind::FileFromVisitor,
            Self::Info => MessageKind::Info,
            Self::Keyboard => MessageKind::Keyboard,
            Self::KeyboardResponse => MessageKind::KeyboardResponse,
            Self::Operator => MessageKind::Operator,
            Self::OperatorBusy => MessageKind::OperatorBusy,
            Self::Visitor => MessageKind::Visitor,
        }
    }

    /// Returns `true` for file messages.
    #[must_use]
    pub const fn is_file(self) -> bool {
        self.kind().is_file()
    }
}

impl TryFrom<MessageKind> for MessageType {
    type Error = MessageKind;

    /// Fails with the original kind when it is a control record.
    fn try_from(kind: MessageKind) -> Result<Self, Self::Error> {
        kind.message_type().ok_or(kind)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().as_str())
    }
}
