//! The message normalizer.
//!
//! Turns one raw record into a canonical [`Message`] or a rejection. Steps
//! run in a fixed order so that a record missing several fields always
//! reports the same one.

use crate::message::{
    adapters::TracingDiagnostics,
    domain::{
        Message, MessageData, MessageId, MessageKind, MessageOrigin, MessageType, OperatorId,
        RawMessageRecord, Timestamp,
    },
    error::{NormalizationError, RequiredField},
    ports::{Diagnostic, DiagnosticsSink, SessionContext},
};

use super::{attachment::resolve_attachment, keyboard::parse_keyboard_payload, quote::resolve_quote};

/// Result type for normalization.
pub type NormalizationResult<T> = Result<T, NormalizationError>;

/// Configuration for a [`MessageNormalizer`].
///
/// # Examples
///
/// ```
/// use palaver::message::normalization::NormalizerConfig;
///
/// let config = NormalizerConfig::new("https://chat.example.com");
/// assert_eq!(config.server_url, "https://chat.example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Base URL of the chat server the records came from.
    pub server_url: String,
}

impl NormalizerConfig {
    /// Creates a configuration for the given server.
    #[must_use]
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
        }
    }
}

/// Converts raw records into canonical messages.
///
/// Rejections are returned to the caller and reported once to the
/// diagnostics sink, except for control records, which are expected and
/// dropped quietly. Degraded payloads (a malformed keyboard, an unresolvable
/// quoted file) are reported only when the message itself survives.
///
/// # Examples
///
/// ```
/// use palaver::message::domain::{MessageOrigin, MessageType, RawMessageRecord};
/// use palaver::message::normalization::{MessageNormalizer, NormalizerConfig};
///
/// let normalizer = MessageNormalizer::new(NormalizerConfig::new("https://chat.example.com"));
/// let record = RawMessageRecord {
///     kind: Some("visitor".to_owned()),
///     client_side_id: Some("m1".to_owned()),
///     name: Some("Visitor".to_owned()),
///     text: Some("hi".to_owned()),
///     timestamp: Some(1_700_000_000_000_000),
///     ..RawMessageRecord::default()
/// };
///
/// let message = normalizer
///     .normalize(&record, MessageOrigin::Live, None)
///     .expect("valid record");
/// assert_eq!(message.message_type(), MessageType::Visitor);
/// assert_eq!(message.text(), "hi");
/// ```
#[derive(Debug, Clone)]
pub struct MessageNormalizer<D: DiagnosticsSink = TracingDiagnostics> {
    config: NormalizerConfig,
    diagnostics: D,
}

impl MessageNormalizer {
    /// Creates a normalizer reporting through `tracing`.
    #[must_use]
    pub const fn new(config: NormalizerConfig) -> Self {
        Self {
            config,
            diagnostics: TracingDiagnostics,
        }
    }
}

impl<D: DiagnosticsSink> MessageNormalizer<D> {
    /// Creates a normalizer reporting to a custom sink.
    #[must_use]
    pub const fn with_diagnostics(config: NormalizerConfig, diagnostics: D) -> Self {
        Self {
            config,
            diagnostics,
        }
    }

    /// Returns the normalizer configuration.
    #[must_use]
    pub const fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Returns the diagnostics sink.
    #[must_use]
    pub const fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Normalizes one record.
    ///
    /// `session` is consulted only for file attachments, in the record
    /// itself or in its quote.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizationError`] describing the first precondition the
    /// record fails.
    pub fn normalize(
        &self,
        record: &RawMessageRecord,
        origin: MessageOrigin,
        session: Option<&dyn SessionContext>,
    ) -> NormalizationResult<Message> {
        let mut degraded = Vec::new();
        match self.assemble(record, origin, session, &mut degraded) {
            Ok(message) => {
                for diagnostic in &degraded {
                    self.diagnostics.emit(diagnostic);
                }
                Ok(message)
            }
            Err(error) => {
                if !error.is_silent() {
                    self.diagnostics.emit(&Diagnostic::Rejected {
                        message_id: record.client_side_id.clone(),
                        error: error.clone(),
                    });
                }
                Err(error)
            }
        }
    }

    fn assemble(
        &self,
        record: &RawMessageRecord,
        origin: MessageOrigin,
        session: Option<&dyn SessionContext>,
        degraded: &mut Vec<Diagnostic>,
    ) -> NormalizationResult<Message> {
        let raw_kind = record
            .kind
            .as_deref()
            .ok_or(NormalizationError::MissingField(RequiredField::Kind))?;
        let message_type = classify(raw_kind)?;
        let body = record
            .text
            .as_deref()
            .ok_or(NormalizationError::MissingField(RequiredField::Text))?;

        let server_url = self.config.server_url.as_str();
        let (text, file) = if message_type.is_file() {
            let session = session.ok_or(NormalizationError::NoSession)?;
            let file = resolve_attachment(server_url, body, session)?;
            (file.file_name().to_owned(), Some(file))
        } else {
            (body.to_owned(), None)
        };

        let keyboard = match record.data.as_ref() {
            Some(data) => match parse_keyboard_payload(message_type.kind(), data) {
                Some(Ok(payload)) => Some(payload),
                Some(Err(error)) => {
                    degraded.push(Diagnostic::KeyboardDiscarded {
                        message_id: record.client_side_id.clone(),
                        error,
                    });
                    None
                }
                None => None,
            },
            None => None,
        };

        let quote = match record.quote.as_ref() {
            Some(raw) => {
                let resolution = resolve_quote(raw, server_url, session)?;
                if let Some(reason) = resolution.discarded_attachment {
                    degraded.push(Diagnostic::QuoteAttachmentDiscarded {
                        message_id: record.client_side_id.clone(),
                        reason,
                    });
                }
                Some(resolution.quote)
            }
            None => None,
        };

        let id = record
            .client_side_id
            .as_deref()
            .ok_or(NormalizationError::MissingField(RequiredField::Id))?;
        let sender_name = record
            .name
            .as_deref()
            .ok_or(NormalizationError::MissingField(RequiredField::SenderName))?;
        let timestamp = record
            .timestamp
            .ok_or(NormalizationError::MissingField(RequiredField::Timestamp))?;

        let mut builder = Message::builder(
            server_url,
            MessageId::new(id),
            sender_name,
            message_type,
            text,
            Timestamp::from_micros(timestamp),
        )
        .with_origin(origin)
        .with_read(record.read.unwrap_or(true))
        .with_can_be_edited(record.can_be_edited.unwrap_or(false))
        .with_can_be_replied(record.can_be_replied.unwrap_or(false));

        if let Some(file) = file {
            builder = builder
                .with_raw_text(body)
                .with_message_data(MessageData::ready(file));
        }
        if let Some(storage_id) = &record.id {
            builder = builder.with_storage_id(storage_id.as_str());
        }
        if let Some(author_id) = &record.author_id {
            builder = builder.with_operator_id(OperatorId::new(author_id.as_str()));
        }
        if let Some(avatar) = &record.avatar {
            builder = builder.with_avatar(avatar.as_str());
        }
        if let Some(data) = &record.data {
            builder = builder.with_data(data.clone());
        }
        if let Some(payload) = keyboard {
            builder = builder.with_keyboard_payload(payload);
        }
        if let Some(quote) = quote {
            builder = builder.with_quote(quote);
        }
        Ok(builder.build())
    }
}

/// Maps a wire kind to its canonical type.
fn classify(raw_kind: &str) -> NormalizationResult<MessageType> {
    let kind = raw_kind
        .parse::<MessageKind>()
        .map_err(|_| NormalizationError::UnsupportedKind(raw_kind.to_owned()))?;
    MessageType::try_from(kind).map_err(NormalizationError::ControlRecord)
}
