//! Validation unit request/acknowledgment contract

use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use wintail_actors::ValidationUnit;
use wintail_core::{Continue, ValidationConfig, ValidationOutcome};

async fn request(
    handle: &wintail_actors::ValidationHandle,
    writer: &mut mpsc::UnboundedReceiver<ValidationOutcome>,
    input: Option<&str>,
) -> ValidationOutcome {
    let (reply_to, reply) = oneshot::channel();
    handle
        .classify(input.map(str::to_string), reply_to)
        .await
        .unwrap();

    let ack = timeout(Duration::from_secs(2), reply).await.unwrap().unwrap();
    assert_eq!(ack, Continue);

    // The outcome was sent before the acknowledgment
    writer.try_recv().expect("outcome should precede Continue")
}

#[tokio::test]
async fn test_outcome_then_continue() {
    let (writer_tx, mut writer) = mpsc::unbounded_channel();
    let mut handle = ValidationUnit::start(writer_tx, &ValidationConfig::default());

    assert_eq!(
        request(&handle, &mut writer, Some("ab")).await,
        ValidationOutcome::Accepted {
            text: "ab".to_string()
        }
    );
    assert_eq!(
        request(&handle, &mut writer, Some("abc")).await,
        ValidationOutcome::Rejected {
            text: "abc".to_string()
        }
    );
    assert_eq!(
        request(&handle, &mut writer, Some("")).await,
        ValidationOutcome::EmptyInput
    );
    assert_eq!(
        request(&handle, &mut writer, None).await,
        ValidationOutcome::EmptyInput
    );

    handle.stop().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_one_outcome_and_one_ack_per_request_under_concurrency() {
    let (writer_tx, mut writer) = mpsc::unbounded_channel();
    let mut handle = ValidationUnit::start(writer_tx, &ValidationConfig::default());

    let mut senders = Vec::new();
    for worker in 0..8 {
        let client = handle.client();
        senders.push(tokio::spawn(async move {
            let mut acks = 0;
            for i in 0..25 {
                let input = "x".repeat(worker + i);
                let (reply_to, reply) = oneshot::channel();
                client.classify(Some(input), reply_to).await.unwrap();
                if reply.await.is_ok() {
                    acks += 1;
                }
            }
            acks
        }));
    }

    let mut total_acks = 0;
    for sender in senders {
        total_acks += sender.await.unwrap();
    }
    assert_eq!(total_acks, 200);

    handle.stop().await.unwrap();
    let mut outcomes = Vec::new();
    while let Ok(outcome) = writer.try_recv() {
        outcomes.push(outcome);
    }
    assert_eq!(outcomes.len(), 200);
    // worker 0, i 0 is the only empty input
    let empty = outcomes
        .iter()
        .filter(|o| **o == ValidationOutcome::EmptyInput)
        .count();
    assert_eq!(empty, 1);
}

#[tokio::test]
async fn test_classify_after_stop_fails() {
    let (writer_tx, _writer) = mpsc::unbounded_channel();
    let mut handle = ValidationUnit::start(writer_tx, &ValidationConfig::default());
    let client = handle.client();

    handle.stop().await.unwrap();
    assert!(!handle.is_running());
    handle.stop().await.unwrap();

    let (reply_to, _reply) = oneshot::channel();
    let result = client.classify(Some("ab".to_string()), reply_to).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_closed_writer_still_acknowledges() {
    let (writer_tx, writer) = mpsc::unbounded_channel();
    drop(writer);
    let mut handle = ValidationUnit::start(writer_tx, &ValidationConfig::default());

    let (reply_to, reply) = oneshot::channel();
    handle.classify(Some("odd".to_string()), reply_to).await.unwrap();
    assert_eq!(reply.await.unwrap(), Continue);

    handle.stop().await.unwrap();
}
