//! Interactive bot keyboards and the visitor's responses to them.
//!
//! Both shapes travel in a record's opaque `data` field; the record kind
//! decides which one to expect.

use serde::{Deserialize, Serialize};

/// A keyboard of buttons offered to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyboard {
    /// Whether the keyboard is still awaiting an answer.
    pub state: KeyboardState,
    /// Button rows, top to bottom.
    #[serde(default)]
    pub buttons: Vec<Vec<KeyboardButton>>,
    /// The answer chosen by the visitor, once there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<KeyboardResponse>,
}

impl Keyboard {
    /// Looks up a button by identifier across all rows.
    #[must_use]
    pub fn button(&self, id: &str) -> Option<&KeyboardButton> {
        self.buttons.iter().flatten().find(|button| button.id == id)
    }
}

/// Keyboard lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardState {
    /// Waiting for the visitor to press a button.
    Pending,
    /// Withdrawn before the visitor answered.
    Canceled,
    /// The visitor pressed a button.
    Completed,
}

/// A single keyboard button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardButton {
    /// Button identifier, echoed back in responses.
    pub id: String,
    /// Caption shown on the button.
    pub text: String,
    /// Optional client-side behaviour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ButtonConfig>,
}

/// Client-side behaviour attached to a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonConfig {
    /// What pressing the button does.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ButtonAction>,
    /// Action payload, such as the URL to open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Text placed into the input field for insert actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_to_insert: Option<String>,
    /// Visibility of the button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ButtonState>,
}

/// Action performed when a configured button is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    /// Open the URL in `data`.
    Url,
    /// Insert `text_to_insert` into the input field.
    Insert,
}

/// Visibility of a configured button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    /// Shown normally.
    Showing,
    /// Shown and highlighted as the chosen answer.
    ShowingSelected,
    /// Not shown.
    Hidden,
}

/// The recorded answer on a completed keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardResponse {
    /// Identifier of the pressed button.
    pub button_id: String,
    /// Identifier of the message that carried the answer.
    pub message_id: String,
}

/// A visitor's keyboard answer, carried by `keyboard_response` records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardRequest {
    /// The button that was pressed.
    pub button: KeyboardButton,
    /// The keyboard message being answered.
    pub request: KeyboardRequestTarget,
}

impl KeyboardRequest {
    /// Returns the identifier of the keyboard message being answered.
    #[must_use]
    pub fn message_id(&self) -> &str {
        &self.request.message_id
    }
}

/// Reference from a keyboard answer back to its keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardRequestTarget {
    /// Identifier of the keyboard message.
    pub message_id: String,
}
