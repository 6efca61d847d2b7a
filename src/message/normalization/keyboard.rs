//! Keyboard payload parsing.
//!
//! `keyboard` and `keyboard_response` records share the `data` field but
//! carry different shapes in it. The record kind picks the shape before
//! anything is parsed, so a message can never end up with both.

use serde::Deserialize;
use serde_json::Value;

use crate::message::{
    domain::{Keyboard, KeyboardPayload, KeyboardRequest, MessageKind},
    error::KeyboardParseError,
};

/// Parses the keyboard payload expected for `kind`.
///
/// Returns `None` for kinds that carry no keyboard payload.
///
/// # Examples
///
/// ```
/// use palaver::message::domain::{KeyboardPayload, KeyboardState, MessageKind};
/// use palaver::message::normalization::keyboard::parse_keyboard_payload;
/// use serde_json::json;
///
/// let data = json!({"state": "pending", "buttons": [[{"id": "1", "text": "Yes"}]]});
/// let payload = parse_keyboard_payload(MessageKind::Keyboard, &data)
///     .expect("keyboard kind")
///     .expect("well-formed");
/// assert!(matches!(
///     payload,
///     KeyboardPayload::Keyboard(ref keyboard) if keyboard.state == KeyboardState::Pending
/// ));
///
/// assert!(parse_keyboard_payload(MessageKind::Operator, &data).is_none());
/// ```
#[must_use]
pub fn parse_keyboard_payload(
    kind: MessageKind,
    data: &Value,
) -> Option<Result<KeyboardPayload, KeyboardParseError>> {
    match kind {
        MessageKind::Keyboard => Some(parse_keyboard(data).map(KeyboardPayload::Keyboard)),
        MessageKind::KeyboardResponse => {
            Some(parse_keyboard_request(data).map(KeyboardPayload::Request))
        }
        _ => None,
    }
}

/// Parses a keyboard definition.
///
/// # Errors
///
/// Returns [`KeyboardParseError`] if `data` does not describe a keyboard.
pub fn parse_keyboard(data: &Value) -> Result<Keyboard, KeyboardParseError> {
    Keyboard::deserialize(data).map_err(|source| KeyboardParseError {
        kind: MessageKind::Keyboard,
        source,
    })
}

/// Parses a keyboard answer.
///
/// # Errors
///
/// Returns [`KeyboardParseError`] if `data` does not describe an answer.
pub fn parse_keyboard_request(data: &Value) -> Result<KeyboardRequest, KeyboardParseError> {
    KeyboardRequest::deserialize(data).map_err(|source| KeyboardParseError {
        kind: MessageKind::KeyboardResponse,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::domain::{ButtonAction, ButtonState, KeyboardState};
    use serde_json::json;

    #[test]
    fn parses_completed_keyboard_with_response() {
        let data = json!({
            "state": "completed",
            "buttons": [
                [{"id": "yes", "text": "Yes"}, {"id": "no", "text": "No"}],
                [{
                    "id": "site",
                    "text": "Website",
                    "config": {"type": "url", "data": "https://example.com", "state": "showing"}
                }]
            ],
            "response": {"buttonId": "yes", "messageId": "m7"}
        });

        let keyboard = parse_keyboard(&data).expect("should parse");

        assert_eq!(keyboard.state, KeyboardState::Completed);
        assert_eq!(keyboard.buttons.len(), 2);
        let response = keyboard.response.as_ref().expect("response present");
        assert_eq!(response.button_id, "yes");
        assert_eq!(response.message_id, "m7");
        let config = keyboard
            .button("site")
            .and_then(|button| button.config.as_ref())
            .expect("configured button");
        assert_eq!(config.action, Some(ButtonAction::Url));
        assert_eq!(config.state, Some(ButtonState::Showing));
    }

    #[test]
    fn parses_keyboard_request() {
        let data = json!({
            "button": {"id": "yes", "text": "Yes"},
            "request": {"messageId": "m7"}
        });

        let request = parse_keyboard_request(&data).expect("should parse");

        assert_eq!(request.button.id, "yes");
        assert_eq!(request.message_id(), "m7");
    }

    #[test]
    fn rejects_keyboard_with_unknown_state() {
        let data = json!({"state": "exploded", "buttons": []});

        let error = parse_keyboard(&data).expect_err("should fail");

        assert_eq!(error.kind, MessageKind::Keyboard);
    }

    #[test]
    fn keyboard_kind_never_yields_request() {
        let data = json!({
            "button": {"id": "yes", "text": "Yes"},
            "request": {"messageId": "m7"}
        });

        let result = parse_keyboard_payload(MessageKind::Keyboard, &data).expect("keyboard kind");

        assert!(result.is_err());
    }

    #[test]
    fn response_kind_yields_request() {
        let data = json!({
            "button": {"id": "yes", "text": "Yes"},
            "request": {"messageId": "m7"}
        });

        let result =
            parse_keyboard_payload(MessageKind::KeyboardResponse, &data).expect("response kind");

        assert!(matches!(result, Ok(KeyboardPayload::Request(_))));
    }
}
