//! Unit tests for the live and history mappers.

use std::sync::{Arc, Weak};

use rstest::rstest;

use super::fixtures::{RecordingDiagnostics, file_record, normalizer, record, session};
use crate::message::{
    domain::{MessageOrigin, RawMessageRecord},
    error::{NormalizationError, RequiredField},
    normalization::MessageNormalizer,
    ports::session::MockSessionContext,
    services::IncomingMessageMapper,
};

type Mapper = IncomingMessageMapper<MockSessionContext, RecordingDiagnostics>;

fn with_id(kind: &str, id: &str) -> RawMessageRecord {
    RawMessageRecord {
        client_side_id: Some(id.to_owned()),
        ..record(kind)
    }
}

fn mixed_batch() -> Vec<RawMessageRecord> {
    vec![
        with_id("operator", "m1"),
        with_id("for_operator", "m2"),
        RawMessageRecord {
            name: None,
            ..with_id("visitor", "m3")
        },
        with_id("visitor", "m4"),
        with_id("sticker", "m5"),
        with_id("info", "m6"),
    ]
}

#[rstest]
fn map_all_drops_rejects_and_keeps_order(normalizer: MessageNormalizer<RecordingDiagnostics>) {
    let mapper = Mapper::live(normalizer, Weak::new());

    let messages = mapper.map_all(&mixed_batch());

    let ids: Vec<&str> = messages.iter().map(|m| m.id().as_str()).collect();
    assert_eq!(ids, ["m1", "m4", "m6"]);
}

#[rstest]
fn map_all_with_report_lists_rejections(normalizer: MessageNormalizer<RecordingDiagnostics>) {
    let mapper = Mapper::history(normalizer, Weak::new());
    let records = mixed_batch();

    let batch = mapper.map_all_with_report(&records);

    assert_eq!(batch.messages.len() + batch.rejections.len(), records.len());
    let indices: Vec<usize> = batch.rejections.iter().map(|r| r.index).collect();
    assert_eq!(indices, [1, 2, 4]);
    assert!(matches!(
        batch.rejections[0].error,
        NormalizationError::ControlRecord(_)
    ));
    assert_eq!(
        batch.rejections[1].error,
        NormalizationError::MissingField(RequiredField::SenderName)
    );
    assert_eq!(
        batch.rejections[2].error,
        NormalizationError::UnsupportedKind("sticker".to_owned())
    );
}

#[rstest]
fn map_all_on_empty_input_is_empty(normalizer: MessageNormalizer<RecordingDiagnostics>) {
    let mapper = Mapper::live(normalizer, Weak::new());

    assert!(mapper.map_all(Vec::<RawMessageRecord>::new().iter()).is_empty());
}

#[rstest]
fn rejected_batch_is_indistinguishable_from_empty_batch(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
) {
    let mapper = Mapper::live(normalizer, Weak::new());
    let controls = [with_id("contacts", "c1"), with_id("for_operator", "c2")];

    assert!(mapper.map_all(&controls).is_empty());
}

#[rstest]
#[case(MessageOrigin::Live, false)]
#[case(MessageOrigin::History, true)]
fn mapper_stamps_its_origin(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
    #[case] origin: MessageOrigin,
    #[case] is_history: bool,
) {
    let mapper = Mapper::new(normalizer, origin, Weak::new());

    let message = mapper.map_one(&record("operator")).expect("should map");

    assert_eq!(mapper.origin(), origin);
    assert_eq!(message.is_history(), is_history);
}

#[rstest]
fn map_one_returns_none_for_rejects(normalizer: MessageNormalizer<RecordingDiagnostics>) {
    let mapper = Mapper::live(normalizer, Weak::new());

    assert!(mapper.map_one(&record("for_operator")).is_none());
}

#[rstest]
fn file_records_resolve_while_session_is_alive(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
    session: MockSessionContext,
) {
    let session = Arc::new(session);
    let mapper = Mapper::live(normalizer, Arc::downgrade(&session));

    let message = mapper.map_one(&file_record("file_operator")).expect("should map");

    assert_eq!(message.text(), "report.txt");
    assert_eq!(Arc::strong_count(&session), 1);
}

#[rstest]
fn file_records_are_dropped_once_session_is_gone(
    normalizer: MessageNormalizer<RecordingDiagnostics>,
    session: MockSessionContext,
) {
    let session = Arc::new(session);
    let mapper = Mapper::live(normalizer, Arc::downgrade(&session));
    drop(session);

    let batch = mapper.map_all_with_report(&[file_record("file_visitor"), record("visitor")]);

    assert_eq!(batch.messages.len(), 1);
    assert_eq!(batch.rejections.len(), 1);
    assert_eq!(batch.rejections[0].error, NormalizationError::NoSession);
}
