//! Application services for incoming and outgoing messages.

pub mod mapper;
pub mod outgoing;

pub use mapper::{IncomingMessageMapper, MappedBatch, Rejection};
pub use outgoing::OutgoingMessageFactory;
