//! Domain types for the message subsystem.
//!
//! This module contains pure domain types with no infrastructure dependencies.
//! Canonical types are immutable after construction and serialisable via serde;
//! the raw record types mirror the wire shape and are validated elsewhere.

mod attachment;
mod ids;
mod keyboard;
mod kind;
mod message;
mod quote;
mod raw;
mod timestamp;

pub use attachment::{AttachmentState, FileInfo, ImageInfo, MessageData};
pub use ids::{MessageId, OperatorId};
pub use keyboard::{
    ButtonAction, ButtonConfig, ButtonState, Keyboard, KeyboardButton, KeyboardRequest,
    KeyboardRequestTarget, KeyboardResponse, KeyboardState,
};
pub use kind::{MessageKind, MessageType, ParseMessageKindError};
pub use message::{KeyboardPayload, Message, MessageBuilder, MessageOrigin};
pub use quote::{Quote, QuoteState};
pub use raw::{RawMessageRecord, RawQuote, RawQuotedMessage};
pub use timestamp::Timestamp;
