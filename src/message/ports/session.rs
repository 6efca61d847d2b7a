//! Session context port.
//!
//! A live session is the only party able to turn a file's storage guid
//! into a link the server will honour. The normalizer borrows the session
//! for the duration of one record and never mutates it.

use crate::message::error::AttachmentError;

/// Port for the live client session consulted during attachment lookups.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Be cheap to call once per file record
/// - Not block on I/O; signing is local computation
/// - Be thread-safe, as mappers may be shared across threads
#[cfg_attr(test, mockall::automock)]
pub trait SessionContext: Send + Sync {
    /// Builds an absolute download URL for a stored file.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError`] if the server URL is unusable or the
    /// session cannot authorise the link.
    fn file_url(
        &self,
        server_url: &str,
        guid: &str,
        file_name: &str,
    ) -> Result<String, AttachmentError>;
}
