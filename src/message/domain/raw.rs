//! Raw message records as received from the transport or read back from
//! history storage.
//!
//! Every field is optional here; which ones must be present depends on the
//! record kind and is decided by the normalizer, not by deserialisation.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An unvalidated message record.
///
/// # Examples
///
/// ```
/// use palaver::message::domain::RawMessageRecord;
/// use serde_json::json;
///
/// let record: RawMessageRecord = serde_json::from_value(json!({
///     "kind": "operator",
///     "clientSideId": "m1",
///     "authorId": 42,
///     "name": "Alice",
///     "text": "Hello",
///     "ts_m": 1_700_000_000_000_000_i64
/// }))
/// .expect("valid record");
/// assert_eq!(record.author_id.as_deref(), Some("42"));
/// assert!(record.read.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessageRecord {
    /// Internal storage identifier assigned by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Client-assigned message identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_side_id: Option<String>,
    /// Wire kind discriminator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Identifier of the authoring operator.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_id: Option<String>,
    /// Display name of the sender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar reference, usually a path relative to the server URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Free-text body. For file kinds this holds the attachment descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Opaque structured payload, e.g. a keyboard definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Reference to a quoted message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<RawQuote>,
    /// Send time in microseconds since the Unix epoch.
    #[serde(rename = "ts_m", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Whether the message has been read by the other side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    /// Whether the visitor may still edit the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_be_edited: Option<bool>,
    /// Whether the visitor may reply to the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_be_replied: Option<bool>,
}

/// A quote reference embedded in a raw record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuote {
    /// Wire quote state (`pending`, `filled`, `not-found`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// The quoted message, once the server has filled it in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<RawQuotedMessage>,
}

/// The quoted message inside a [`RawQuote`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuotedMessage {
    /// Identifier of the quoted message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Wire kind of the quoted message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Body of the quoted message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Sender name of the quoted message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Operator who authored the quoted message.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_id: Option<String>,
    /// Send time of the quoted message in microseconds.
    #[serde(rename = "ts", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// Operator identifiers are numeric in live traffic but strings in history.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    }))
}
