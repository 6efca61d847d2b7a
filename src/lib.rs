//! Palaver: message normalization core for a chat client SDK.
//!
//! This crate converts raw message records, as received from the chat
//! backend or read from persisted history, into one canonical, validated
//! message representation, and builds the messages a visitor sends.
//!
//! # Architecture
//!
//! Palaver follows hexagonal architecture principles:
//!
//! - **Domain**: Pure message types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the session and diagnostics
//! - **Adapters**: Concrete implementations of ports (link signing, `tracing`)
//!
//! # Modules
//!
//! - [`message`]: Canonical message format, normalization and mapping

pub mod message;
