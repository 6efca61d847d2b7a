//! Quote resolution.
//!
//! A broken quote must not cost the reply itself, with one exception: a
//! quoted file message that carries no text cannot be represented at all,
//! and takes the containing record down with it.

use crate::message::{
    domain::{MessageId, MessageKind, OperatorId, Quote, QuoteState, RawQuote, Timestamp},
    error::NormalizationError,
    ports::SessionContext,
};

use super::attachment::resolve_attachment;

/// Outcome of resolving a quote reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteResolution {
    /// The canonical quote.
    pub quote: Quote,
    /// Why a quoted file was left out, when it was.
    pub discarded_attachment: Option<NormalizationError>,
}

/// Builds a canonical quote from a raw quote reference.
///
/// Quoted files are resolved against `server_url` through `session`. When
/// that is impossible the quote is returned without its attachment and the
/// reason is recorded in [`QuoteResolution::discarded_attachment`].
///
/// # Errors
///
/// Returns [`NormalizationError::QuotedFileWithoutText`] when the quoted
/// message is a file but has no text to resolve.
pub fn resolve_quote(
    raw: &RawQuote,
    server_url: &str,
    session: Option<&dyn SessionContext>,
) -> Result<QuoteResolution, NormalizationError> {
    let mut quote = Quote::new(QuoteState::from_wire(raw.state.as_deref()));
    let Some(message) = raw.message.as_ref() else {
        return Ok(QuoteResolution {
            quote,
            discarded_attachment: None,
        });
    };

    let kind = message
        .kind
        .as_deref()
        .and_then(|kind| kind.parse::<MessageKind>().ok());

    let mut discarded_attachment = None;
    if kind.is_some_and(MessageKind::is_file) {
        let text = message
            .text
            .as_deref()
            .ok_or(NormalizationError::QuotedFileWithoutText)?;
        match session {
            Some(session) => match resolve_attachment(server_url, text, session) {
                Ok(file) => quote = quote.with_attachment(file),
                Err(error) => discarded_attachment = Some(error.into()),
            },
            None => discarded_attachment = Some(NormalizationError::NoSession),
        }
    }

    if let Some(message_type) = kind.and_then(MessageKind::message_type) {
        quote = quote.with_message_type(message_type);
    }
    if let Some(author_id) = &message.author_id {
        quote = quote.with_author_id(OperatorId::new(author_id.as_str()));
    }
    if let Some(id) = &message.id {
        quote = quote.with_message_id(MessageId::new(id.as_str()));
    }
    if let Some(name) = &message.name {
        quote = quote.with_sender_name(name.as_str());
    }
    if let Some(text) = &message.text {
        quote = quote.with_text(text.as_str());
    }
    if let Some(micros) = message.timestamp {
        quote = quote.with_timestamp(Timestamp::from_micros(micros));
    }

    Ok(QuoteResolution {
        quote,
        discarded_attachment,
    })
}
