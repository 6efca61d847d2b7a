//! Unit tests for the message normalizer.

use rstest::rstest;
use serde_json::json;

use super::fixtures::{
    RecordingDiagnostics, SERVER_URL, file_body, file_record, normalizer, record, session,
};
use crate::message::{
    domain::{AttachmentState, KeyboardState, MessageOrigin, MessageType, RawMessageRecord},
    error::{AttachmentError, NormalizationError, RequiredField},
    normalization::{MessageNormalizer, NormalizerConfig},
    ports::{
        Diagnostic, DiagnosticLevel, diagnostics::MockDiagnosticsSink,
        session::MockSessionContext,
    },
};

// ============================================================================
// Kind table
// ============================================================================

#[rstest]
#[case("action_request", MessageType::ActionRequest)]
#[case("contacts_request", MessageType::ContactInformationRequest)]
#[case("info", MessageType::Info)]
#[case("keyboard", MessageType::Keyboard)]
#[case("keyboard_response", MessageType::KeyboardResponse)]
#[case("operator", MessageType::Operator)]
#[case("operator_busy", MessageType::OperatorBusy)]
#[case("visitor", MessageType::Visitor)]
fn visible_text_kinds_map_to_their_type(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
    #[case] kind: &str,
    #[case] expected: MessageType,
) {
    let message = normalizer
        .normalize(&record(kind), MessageOrigin::Live, None)
        .expect("should normalize");

    assert_eq!(message.message_type(), expected);
    assert!(normalizer.diagnostics().recorded().is_empty());
}

#[rstest]
#[case("file_operator", MessageType::FileFromOperator)]
#[case("file_visitor", MessageType::FileFromVisitor)]
fn visible_file_kinds_map_to_their_type(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
    session: MockSessionContext,
    #[case] kind: &str,
    #[case] expected: MessageType,
) {
    let message = normalizer
        .normalize(&file_record(kind), MessageOrigin::Live, Some(&session))
        .expect("should normalize");

    assert_eq!(message.message_type(), expected);
}

#[rstest]
#[case("contacts")]
#[case("for_operator")]
fn control_records_are_rejected_silently(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
    session: MockSessionContext,
    #[case] kind: &str,
) {
    let result = normalizer.normalize(&record(kind), MessageOrigin::Live, Some(&session));

    assert!(matches!(result, Err(NormalizationError::ControlRecord(k)) if k.as_str() == kind));
    assert!(normalizer.diagnostics().recorded().is_empty());
}

#[rstest]
fn control_records_are_rejected_even_without_other_fields(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
) {
    let bare = RawMessageRecord {
        kind: Some("for_operator".to_owned()),
        ..RawMessageRecord::default()
    };

    let result = normalizer.normalize(&bare, MessageOrigin::History, None);

    assert!(matches!(result, Err(NormalizationError::ControlRecord(_))));
}

#[rstest]
fn unknown_kind_is_rejected_with_its_raw_value(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
) {
    let result = normalizer.normalize(&record("sticker"), MessageOrigin::Live, None);

    assert_eq!(
        result,
        Err(NormalizationError::UnsupportedKind("sticker".to_owned()))
    );
    let recorded = normalizer.diagnostics().recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].level, DiagnosticLevel::Warning);
    assert!(recorded[0].text.contains("sticker"));
}

// ============================================================================
// Required fields
// ============================================================================

#[rstest]
#[case(RequiredField::Kind)]
#[case(RequiredField::Text)]
#[case(RequiredField::Id)]
#[case(RequiredField::SenderName)]
#[case(RequiredField::Timestamp)]
fn missing_required_field_is_rejected_with_one_diagnostic(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
    #[case] field: RequiredField,
) {
    let mut incomplete = record("operator");
    match field {
        RequiredField::Kind => incomplete.kind = None,
        RequiredField::Text => incomplete.text = None,
        RequiredField::Id => incomplete.client_side_id = None,
        RequiredField::SenderName => incomplete.name = None,
        RequiredField::Timestamp => incomplete.timestamp = None,
    }

    let result = normalizer.normalize(&incomplete, MessageOrigin::Live, None);

    assert_eq!(result, Err(NormalizationError::MissingField(field)));
    let recorded = normalizer.diagnostics().recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].level, DiagnosticLevel::Warning);
    assert_eq!(recorded[0].missing_field, Some(field));
    assert!(recorded[0].text.contains(field.as_str()));
}

#[rstest]
fn empty_text_is_present_text(normalizer: MessageNormalizer<RecordingDiagnostics>) {
    let blank = RawMessageRecord {
        text: Some(String::new()),
        ..record("info")
    };

    let message = normalizer
        .normalize(&blank, MessageOrigin::Live, None)
        .expect("should normalize");

    assert_eq!(message.text(), "");
}

// ============================================================================
// Display text and files
// ============================================================================

#[rstest]
fn text_message_shows_body_verbatim(normalizer: MessageNormalizer<RecordingDiagnostics>) {
    let message = normalizer
        .normalize(&record("operator"), MessageOrigin::Live, None)
        .expect("should normalize");

    assert_eq!(message.text(), "hello");
    assert!(message.raw_text().is_none());
    assert!(message.message_data().is_none());
}

#[rstest]
fn file_message_shows_file_name_and_keeps_body(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
    session: MockSessionContext,
) {
    let record = file_record("file_visitor");

    let message = normalizer
        .normalize(&record, MessageOrigin::Live, Some(&session))
        .expect("should normalize");

    assert_eq!(message.text(), "report.txt");
    assert_eq!(message.raw_text(), record.text.as_deref());
    let data = message.message_data().expect("message data");
    assert_eq!(data.state(), AttachmentState::Ready);
    let file = message.attachment().expect("attachment");
    assert_eq!(file.url(), format!("{SERVER_URL}/files/g-1/report.txt"));
    assert_eq!(file.size(), Some(2048));
}

#[rstest]
fn file_message_without_session_is_rejected(normalizer: MessageNormalizer<RecordingDiagnostics>) {
    let result = normalizer.normalize(&file_record("file_operator"), MessageOrigin::Live, None);

    assert_eq!(result, Err(NormalizationError::NoSession));
    assert_eq!(normalizer.diagnostics().recorded().len(), 1);
}

#[rstest]
fn file_message_with_unparseable_body_is_rejected(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
    session: MockSessionContext,
) {
    let broken = RawMessageRecord {
        text: Some("not a descriptor".to_owned()),
        ..record("file_operator")
    };

    let result = normalizer.normalize(&broken, MessageOrigin::Live, Some(&session));

    assert!(matches!(
        result,
        Err(NormalizationError::Attachment(AttachmentError::Malformed(_)))
    ));
}

#[rstest]
fn file_message_with_failing_session_is_rejected(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
) {
    let mut session = MockSessionContext::new();
    session
        .expect_file_url()
        .returning(|_, _, _| Err(AttachmentError::signing("expired")));

    let result = normalizer.normalize(
        &file_record("file_visitor"),
        MessageOrigin::Live,
        Some(&session),
    );

    assert_eq!(
        result,
        Err(NormalizationError::Attachment(AttachmentError::signing(
            "expired"
        )))
    );
}

#[rstest]
fn text_message_never_consults_session(normalizer: MessageNormalizer<RecordingDiagnostics>) {
    let mut session = MockSessionContext::new();
    session.expect_file_url().never();

    let message = normalizer.normalize(&record("visitor"), MessageOrigin::Live, Some(&session));

    assert!(message.is_ok());
}

// ============================================================================
// Keyboards
// ============================================================================

#[rstest]
fn keyboard_record_carries_keyboard(normalizer: MessageNormalizer<RecordingDiagnostics>) {
    let data = json!({"state": "pending", "buttons": [[{"id": "1", "text": "Yes"}]]});
    let keyboard_record = RawMessageRecord {
        data: Some(data.clone()),
        ..record("keyboard")
    };

    let message = normalizer
        .normalize(&keyboard_record, MessageOrigin::Live, None)
        .expect("should normalize");

    let keyboard = message.keyboard().expect("keyboard");
    assert_eq!(keyboard.state, KeyboardState::Pending);
    assert!(message.keyboard_request().is_none());
    assert_eq!(message.data(), Some(&data));
}

#[rstest]
fn keyboard_response_record_carries_request(normalizer: MessageNormalizer<RecordingDiagnostics>) {
    let response = RawMessageRecord {
        data: Some(json!({"button": {"id": "1", "text": "Yes"}, "request": {"messageId": "k1"}})),
        ..record("keyboard_response")
    };

    let message = normalizer
        .normalize(&response, MessageOrigin::Live, None)
        .expect("should normalize");

    assert_eq!(
        message.keyboard_request().map(|request| request.message_id()),
        Some("k1")
    );
    assert!(message.keyboard().is_none());
}

#[rstest]
fn malformed_keyboard_is_dropped_not_rejected(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
) {
    let malformed = RawMessageRecord {
        data: Some(json!({"buttons": "nope"})),
        ..record("keyboard")
    };

    let message = normalizer
        .normalize(&malformed, MessageOrigin::Live, None)
        .expect("should normalize");

    assert!(message.keyboard().is_none());
    let recorded = normalizer.diagnostics().recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].level, DiagnosticLevel::Info);
    assert_eq!(recorded[0].message_id.as_deref(), Some("m1"));
}

#[rstest]
fn keyboard_data_on_other_kinds_is_passed_through_only(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
) {
    let operator = RawMessageRecord {
        data: Some(json!({"state": "pending", "buttons": []})),
        ..record("operator")
    };

    let message = normalizer
        .normalize(&operator, MessageOrigin::Live, None)
        .expect("should normalize");

    assert!(message.keyboard().is_none());
    assert!(message.data().is_some());
}

#[rstest]
fn degraded_payload_is_not_reported_when_record_is_rejected(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
) {
    let doomed = RawMessageRecord {
        data: Some(json!("garbage")),
        timestamp: None,
        ..record("keyboard")
    };

    let result = normalizer.normalize(&doomed, MessageOrigin::Live, None);

    assert_eq!(
        result,
        Err(NormalizationError::MissingField(RequiredField::Timestamp))
    );
    let recorded = normalizer.diagnostics().recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].level, DiagnosticLevel::Warning);
}

// ============================================================================
// Passthrough fields
// ============================================================================

#[rstest]
fn read_flag_defaults_to_true(normalizer: MessageNormalizer<RecordingDiagnostics>) {
    let message = normalizer
        .normalize(&record("operator"), MessageOrigin::Live, None)
        .expect("should normalize");

    assert!(message.is_read());
    assert!(!message.can_be_edited());
    assert!(!message.can_be_replied());
}

#[rstest]
fn flags_are_carried_verbatim(normalizer: MessageNormalizer<RecordingDiagnostics>) {
    let flagged = RawMessageRecord {
        read: Some(false),
        can_be_edited: Some(true),
        can_be_replied: Some(true),
        ..record("visitor")
    };

    let message = normalizer
        .normalize(&flagged, MessageOrigin::Live, None)
        .expect("should normalize");

    assert!(!message.is_read());
    assert!(message.can_be_edited());
    assert!(message.can_be_replied());
}

#[rstest]
#[case(MessageOrigin::Live, false)]
#[case(MessageOrigin::History, true)]
fn origin_sets_history_flag(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
    #[case] origin: MessageOrigin,
    #[case] expected: bool,
) {
    let message = normalizer
        .normalize(&record("operator"), origin, None)
        .expect("should normalize");

    assert_eq!(message.is_history(), expected);
}

#[rstest]
fn identity_fields_are_carried(normalizer: MessageNormalizer<RecordingDiagnostics>) {
    let operator = RawMessageRecord {
        author_id: Some("42".to_owned()),
        avatar: Some("/avatars/42.png".to_owned()),
        ..record("operator")
    };

    let message = normalizer
        .normalize(&operator, MessageOrigin::Live, None)
        .expect("should normalize");

    assert_eq!(message.id().as_str(), "m1");
    assert_eq!(message.storage_id(), Some("srv-1"));
    assert_eq!(message.sender_name(), "Alice");
    assert_eq!(message.operator_id().map(|id| id.as_str()), Some("42"));
    assert_eq!(message.server_url(), SERVER_URL);
    assert_eq!(
        message.avatar_url().map(String::from),
        Some(format!("{SERVER_URL}/avatars/42.png"))
    );
    assert_eq!(message.timestamp().as_micros(), 1_700_000_000_000_000);
}

#[rstest]
fn file_descriptor_fixture_is_resolvable(session: MockSessionContext) {
    let file = crate::message::normalization::attachment::resolve_attachment(
        SERVER_URL,
        &file_body("a.txt", "g"),
        &session,
    )
    .expect("should resolve");

    assert_eq!(file.file_name(), "a.txt");
}

#[rstest]
fn control_record_never_reaches_the_sink() {
    let mut sink = MockDiagnosticsSink::new();
    sink.expect_emit().never();
    let normalizer = MessageNormalizer::with_diagnostics(NormalizerConfig::new(SERVER_URL), sink);

    let result = normalizer.normalize(&record("contacts"), MessageOrigin::History, None);

    assert!(matches!(result, Err(NormalizationError::ControlRecord(_))));
}

#[rstest]
fn rejection_reaches_the_sink_once_with_its_id() {
    let mut sink = MockDiagnosticsSink::new();
    sink.expect_emit()
        .withf(|diagnostic: &Diagnostic| {
            diagnostic.level() == DiagnosticLevel::Warning && diagnostic.message_id() == Some("m1")
        })
        .times(1)
        .return_const(());
    let normalizer = MessageNormalizer::with_diagnostics(NormalizerConfig::new(SERVER_URL), sink);
    let unsupported = record("sticker");

    let result = normalizer.normalize(&unsupported, MessageOrigin::Live, None);

    assert_eq!(
        result.map(|message| message.id().clone()),
        Err(NormalizationError::UnsupportedKind("sticker".to_owned()))
    );
}
