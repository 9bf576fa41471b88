//! Validation unit: classifies input and always acknowledges the sender

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use wintail_core::error::{Error, Result};
use wintail_core::{Continue, ReplyTo, ValidationConfig, ValidationOutcome, WriterTarget};

/// Classify one piece of input
///
/// Empty or absent input is [`ValidationOutcome::EmptyInput`]; otherwise the
/// number of characters decides between accepted (even) and rejected (odd).
pub fn classify(input: Option<&str>) -> ValidationOutcome {
    match input {
        None | Some("") => ValidationOutcome::EmptyInput,
        Some(text) if text.chars().count() % 2 == 0 => ValidationOutcome::Accepted {
            text: text.to_string(),
        },
        Some(text) => ValidationOutcome::Rejected {
            text: text.to_string(),
        },
    }
}

#[derive(Debug)]
struct ValidationRequest {
    input: Option<String>,
    reply_to: ReplyTo,
}

/// Stateless classifier running behind its own inbox
pub struct ValidationUnit {
    writer: WriterTarget,
}

impl ValidationUnit {
    /// Spawn the unit; outcomes go to `writer`
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(writer: WriterTarget, config: &ValidationConfig) -> ValidationHandle {
        let (inbox_tx, inbox) = mpsc::channel(config.mailbox_capacity.max(1));
        let cancel = CancellationToken::new();
        let task = tokio::spawn(Self { writer }.run(inbox, cancel.clone()));

        info!("Validation unit started");
        ValidationHandle {
            inbox: inbox_tx,
            cancel,
            task: Some(task),
        }
    }

    async fn run(self, mut inbox: mpsc::Receiver<ValidationRequest>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                request = inbox.recv() => match request {
                    Some(request) => self.handle(request),
                    None => break,
                },
            }
        }
        inbox.close();
        info!("Validation unit stopped");
    }

    fn handle(&self, request: ValidationRequest) {
        let outcome = classify(request.input.as_deref());
        debug!("Classified input as {:?}", outcome);

        if self.writer.send(outcome).is_err() {
            debug!("Writer is gone, outcome dropped");
        }
        if request.reply_to.send(Continue).is_err() {
            debug!("Sender stopped waiting for acknowledgment");
        }
    }
}

/// Handle to a running validation unit
#[derive(Debug)]
pub struct ValidationHandle {
    inbox: mpsc::Sender<ValidationRequest>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ValidationHandle {
    /// Post `input` for classification
    ///
    /// The outcome goes to the unit's writer, then [`Continue`] is sent on
    /// `reply_to`. Returns once the request is queued, not when it is handled.
    pub async fn classify(&self, input: Option<String>, reply_to: ReplyTo) -> Result<()> {
        self.client().classify(input, reply_to).await
    }

    /// Cloneable sender for posting requests from other tasks
    pub fn client(&self) -> ValidationClient {
        ValidationClient {
            inbox: self.inbox.clone(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the unit and wait for its task to finish
    ///
    /// Requests still queued are dropped, which closes their reply channels.
    pub async fn stop(&mut self) -> Result<()> {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.await
                .map_err(|e| Error::with_context("Validation unit task failed", e))?;
        }
        Ok(())
    }
}

impl Drop for ValidationHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Request sender for a validation unit
#[derive(Debug, Clone)]
pub struct ValidationClient {
    inbox: mpsc::Sender<ValidationRequest>,
}

impl ValidationClient {
    /// See [`ValidationHandle::classify`]
    pub async fn classify(&self, input: Option<String>, reply_to: ReplyTo) -> Result<()> {
        self.inbox
            .send(ValidationRequest { input, reply_to })
            .await
            .map_err(|_| Error::UnitStopped("validation"))
    }
}
