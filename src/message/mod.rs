//! Canonical chat messages and the pipeline that produces them.
//!
//! This module turns raw message records, as delivered by the transport or
//! read back from history, into validated canonical messages, and builds
//! the messages a visitor is about to send.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure domain types ([`domain::Message`],
//!   [`domain::RawMessageRecord`], [`domain::Quote`], etc.)
//! - **Ports**: Abstract trait interfaces ([`ports::SessionContext`], [`ports::DiagnosticsSink`])
//! - **Adapters**: Concrete implementations ([`adapters::SignedSession`],
//!   [`adapters::TracingDiagnostics`])
//! - **Normalization**: Record validation and nested payload resolution
//! - **Services**: Live and history mappers, outgoing message construction
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use palaver::message::adapters::{SignedSession, SignedSessionConfig};
//! use palaver::message::domain::RawMessageRecord;
//! use palaver::message::normalization::{MessageNormalizer, NormalizerConfig};
//! use palaver::message::services::IncomingMessageMapper;
//! use mockable::DefaultClock;
//! use serde_json::json;
//!
//! let session = Arc::new(SignedSession::new(
//!     SignedSessionConfig::new("page-1", "token"),
//!     DefaultClock,
//! ));
//! let normalizer = MessageNormalizer::new(NormalizerConfig::new("https://chat.example.com"));
//! let mapper = IncomingMessageMapper::history(normalizer, Arc::downgrade(&session));
//!
//! let records: Vec<RawMessageRecord> = serde_json::from_value(json!([
//!     {"kind": "operator", "clientSideId": "m1", "name": "Alice", "text": "Hi", "ts_m": 1},
//!     {"kind": "for_operator", "clientSideId": "m2", "name": "Bob", "text": "psst", "ts_m": 2},
//!     {"kind": "file_visitor", "clientSideId": "m3", "name": "Visitor", "ts_m": 3,
//!      "text": "{\"filename\": \"cat.png\", \"guid\": \"g1\"}"}
//! ]))
//! .expect("valid records");
//!
//! let messages = mapper.map_all(&records);
//! assert_eq!(messages.len(), 2);
//! assert!(messages.iter().all(|message| message.is_history()));
//! assert_eq!(messages[1].text(), "cat.png");
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod normalization;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
