//! Incoming message mapping for live chat and history.
//!
//! A mapper is a [`MessageNormalizer`] pinned to one [`MessageOrigin`],
//! holding a weak handle to the client session. The session is upgraded
//! for the duration of a single call and released again, so a mapper never
//! keeps a closed session alive.

use std::sync::Weak;

use crate::message::{
    adapters::TracingDiagnostics,
    domain::{Message, MessageOrigin, RawMessageRecord},
    error::NormalizationError,
    normalization::MessageNormalizer,
    ports::{DiagnosticsSink, SessionContext},
};

/// A record dropped from a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Position of the record in the input.
    pub index: usize,
    /// Why it was dropped.
    pub error: NormalizationError,
}

/// Outcome of mapping a batch of records.
///
/// `messages` holds the survivors in input order. A batch shorter than its
/// input is the normal outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedBatch {
    /// Canonical messages, in input order.
    pub messages: Vec<Message>,
    /// Records that were dropped.
    pub rejections: Vec<Rejection>,
}

/// Maps raw records to canonical messages for one origin.
#[derive(Debug)]
pub struct IncomingMessageMapper<S: SessionContext, D: DiagnosticsSink = TracingDiagnostics> {
    normalizer: MessageNormalizer<D>,
    origin: MessageOrigin,
    session: Weak<S>,
}

impl<S: SessionContext, D: DiagnosticsSink> IncomingMessageMapper<S, D> {
    /// Creates a mapper for the given origin.
    #[must_use]
    pub const fn new(
        normalizer: MessageNormalizer<D>,
        origin: MessageOrigin,
        session: Weak<S>,
    ) -> Self {
        Self {
            normalizer,
            origin,
            session,
        }
    }

    /// Creates a mapper for records arriving over the live connection.
    #[must_use]
    pub const fn live(normalizer: MessageNormalizer<D>, session: Weak<S>) -> Self {
        Self::new(normalizer, MessageOrigin::Live, session)
    }

    /// Creates a mapper for records loaded from history.
    #[must_use]
    pub const fn history(normalizer: MessageNormalizer<D>, session: Weak<S>) -> Self {
        Self::new(normalizer, MessageOrigin::History, session)
    }

    /// Returns the origin stamped on every mapped message.
    #[must_use]
    pub const fn origin(&self) -> MessageOrigin {
        self.origin
    }

    /// Maps one record, or returns `None` if it was rejected.
    #[must_use]
    pub fn map_one(&self, record: &RawMessageRecord) -> Option<Message> {
        let session = self.session.upgrade();
        self.normalizer
            .normalize(record, self.origin, session.as_deref().map(as_context))
            .ok()
    }

    /// Maps a batch, dropping rejected records and keeping input order.
    #[must_use]
    pub fn map_all<'a>(
        &self,
        records: impl IntoIterator<Item = &'a RawMessageRecord>,
    ) -> Vec<Message> {
        self.map_all_with_report(records).messages
    }

    /// Maps a batch and also reports which records were dropped and why.
    #[must_use]
    pub fn map_all_with_report<'a>(
        &self,
        records: impl IntoIterator<Item = &'a RawMessageRecord>,
    ) -> MappedBatch {
        let session = self.session.upgrade();
        let context = session.as_deref().map(as_context);
        let mut batch = MappedBatch::default();
        for (index, record) in records.into_iter().enumerate() {
            match self.normalizer.normalize(record, self.origin, context) {
                Ok(message) => batch.messages.push(message),
                Err(error) => batch.rejections.push(Rejection { index, error }),
            }
        }
        batch
    }
}

fn as_context<S: SessionContext>(session: &S) -> &dyn SessionContext {
    session
}
