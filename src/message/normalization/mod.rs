//! Normalization of raw message records into canonical messages.
//!
//! The pipeline is split into independently testable resolvers, one per
//! nested structure, and the [`MessageNormalizer`] that drives them:
//!
//! - [`attachment`]: file descriptors and signed download links
//! - [`quote`]: quoted-message references, including quoted files
//! - [`keyboard`]: bot keyboards and keyboard answers
//! - [`service`]: the normalizer itself

pub mod attachment;
pub mod keyboard;
pub mod quote;
pub mod service;

pub use service::{MessageNormalizer, NormalizationResult, NormalizerConfig};
