//! Console reader and writer collaborators

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;
use wintail_actors::ValidationHandle;
use wintail_core::ValidationOutcome;

/// Input that ends the session
pub const EXIT_COMMAND: &str = "exit";

/// Spawn a task writing tail text and validation outcomes to `output`
///
/// Tail text is written as-is and goes first when both are ready; each
/// outcome is written on its own line. The task finishes when both channels
/// are closed and returns `output`.
pub fn spawn_writer<W>(
    mut output: W,
    mut reports: mpsc::UnboundedReceiver<String>,
    mut outcomes: mpsc::UnboundedReceiver<ValidationOutcome>,
) -> JoinHandle<Result<W>>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reports_open = true;
        let mut outcomes_open = true;

        while reports_open || outcomes_open {
            tokio::select! {
                biased;
                text = reports.recv(), if reports_open => match text {
                    Some(text) => output.write_all(text.as_bytes()).await?,
                    None => reports_open = false,
                },
                outcome = outcomes.recv(), if outcomes_open => match outcome {
                    Some(outcome) => {
                        let line = format!("{}\n", outcome.message());
                        output.write_all(line.as_bytes()).await?;
                    }
                    None => outcomes_open = false,
                },
            }
            output.flush().await?;
        }

        debug!("Console writer finished");
        Ok::<_, anyhow::Error>(output)
    })
}

/// Feed each line of `input` to the validation unit, one at a time
///
/// The next line is read only after the unit acknowledged the previous one.
pub async fn read_loop<R>(input: R, validation: &ValidationHandle) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(input).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        if line.trim().eq_ignore_ascii_case(EXIT_COMMAND) {
            debug!("Exit requested");
            break;
        }

        let (reply_to, reply) = oneshot::channel();
        validation.classify(Some(line), reply_to).await?;
        reply
            .await
            .context("Validation unit stopped before acknowledging")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_writer_drains_both_channels() {
        let (reporter, reports) = mpsc::unbounded_channel();
        let (writer, outcomes) = mpsc::unbounded_channel();
        let task = spawn_writer(Vec::new(), reports, outcomes);

        reporter.send("tail text".to_string()).unwrap();
        drop(reporter);
        writer.send(ValidationOutcome::EmptyInput).unwrap();
        drop(writer);

        let output = task.await.unwrap().unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "tail textNo input received\n"
        );
    }
}
