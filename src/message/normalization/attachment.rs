//! Attachment resolution for file messages.
//!
//! A file message's body is a JSON descriptor written by the file server,
//! either wrapped as `{"desc": {...}, "state": "ready"}` or bare. The
//! descriptor names the file and its storage guid; the live session turns
//! the guid into a signed download link.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::message::{
    domain::{FileInfo, ImageInfo},
    error::AttachmentError,
    ports::SessionContext,
};

#[derive(Debug, Deserialize)]
struct Descriptor {
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    guid: Option<String>,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default, alias = "client_content_type")]
    content_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    image: Option<ImageDescriptor>,
}

#[derive(Debug, Deserialize)]
struct ImageDescriptor {
    size: Option<ImageSize>,
}

#[derive(Debug, Deserialize)]
struct ImageSize {
    width: u32,
    height: u32,
}

/// Malformed image metadata reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Reads the descriptor from the `desc` envelope when present, otherwise
/// from the body itself.
fn parse_descriptor(text: &str) -> Result<Descriptor, AttachmentError> {
    let malformed = |e: serde_json::Error| AttachmentError::malformed(e.to_string());
    let mut body: Value = serde_json::from_str(text).map_err(malformed)?;
    let descriptor = body.get_mut("desc").map(Value::take).unwrap_or(body);
    serde_json::from_value(descriptor).map_err(malformed)
}

/// Resolves a file message body into an attachment descriptor.
///
/// # Errors
///
/// Returns [`AttachmentError`] when the body is not a descriptor, lacks a
/// file name or guid, or the session cannot produce a download link.
pub fn resolve_attachment(
    server_url: &str,
    text: &str,
    session: &dyn SessionContext,
) -> Result<FileInfo, AttachmentError> {
    let descriptor = parse_descriptor(text)?;

    let file_name = descriptor
        .filename
        .filter(|name| !name.is_empty())
        .ok_or(AttachmentError::MissingFileName)?;
    let guid = descriptor
        .guid
        .filter(|guid| !guid.is_empty())
        .ok_or(AttachmentError::MissingGuid)?;
    let url = session.file_url(server_url, &guid, &file_name)?;

    let mut file = FileInfo::new(file_name, guid, url);
    if let Some(content_type) = descriptor.content_type {
        file = file.with_content_type(content_type);
    }
    if let Some(size) = descriptor.size {
        file = file.with_size(size);
    }
    if let Some(ImageSize { width, height }) = descriptor.image.and_then(|image| image.size) {
        file = file.with_image(ImageInfo { width, height });
    }
    Ok(file)
}
