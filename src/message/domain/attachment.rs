//! File attachment descriptors and the typed message data that wraps them.

use serde::{Deserialize, Serialize};

/// A file attached to a message, resolved to an absolute download link.
///
/// Descriptors are built fresh for every message (and for every quoted
/// file), so two messages never share one.
///
/// # Examples
///
/// ```
/// use palaver::message::domain::FileInfo;
///
/// let file = FileInfo::new("report.pdf", "0a1b2c", "https://chat.example.com/f/0a1b2c")
///     .with_content_type("application/pdf")
///     .with_size(2048);
/// assert_eq!(file.file_name(), "report.pdf");
/// assert!(file.image().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    file_name: String,
    guid: String,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<ImageInfo>,
}

impl FileInfo {
    /// Creates a descriptor with the mandatory fields.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        guid: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            guid: guid.into(),
            url: url.into(),
            content_type: None,
            size: None,
            image: None,
        }
    }

    /// Sets the MIME type reported by the uploader.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the file size in bytes.
    #[must_use]
    pub const fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets image dimensions for image files.
    #[must_use]
    pub const fn with_image(mut self, image: ImageInfo) -> Self {
        self.image = Some(image);
        self
    }

    /// Returns the original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the storage identifier of the file on the server.
    #[must_use]
    pub fn guid(&self) -> &str {
        &self.guid
    }

    /// Returns the absolute, signed download URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the MIME type, if known.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the size in bytes, if known.
    #[must_use]
    pub const fn size(&self) -> Option<u64> {
        self.size
    }

    /// Returns image dimensions, if the file is an image.
    #[must_use]
    pub const fn image(&self) -> Option<ImageInfo> {
        self.image
    }
}

/// Pixel dimensions of an image attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Lifecycle state of an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentState {
    /// The file is stored on the server and can be downloaded.
    Ready,
    /// The file is still being uploaded by this client.
    Upload,
}

/// Typed message data attached to file messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageData {
    state: AttachmentState,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<FileInfo>,
}

impl MessageData {
    /// Wraps a resolved file that is ready for download.
    #[must_use]
    pub const fn ready(file: FileInfo) -> Self {
        Self {
            state: AttachmentState::Ready,
            file: Some(file),
        }
    }

    /// Placeholder for a file this client has started uploading.
    #[must_use]
    pub const fn uploading() -> Self {
        Self {
            state: AttachmentState::Upload,
            file: None,
        }
    }

    /// Returns the attachment state.
    #[must_use]
    pub const fn state(&self) -> AttachmentState {
        self.state
    }

    /// Returns the file descriptor once it is known.
    #[must_use]
    pub const fn file(&self) -> Option<&FileInfo> {
        self.file.as_ref()
    }
}
