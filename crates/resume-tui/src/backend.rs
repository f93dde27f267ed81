use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use resume_core::{ParseApi, SubmitError, SubmitTicket};

use crate::tui_event::{BackendCommand, BackendEvent};

/// Spawn the backend command listener. Each submission runs as its own task
/// so the listener keeps receiving while a request is in flight.
pub fn spawn_listener(
    api: Arc<dyn ParseApi>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                BackendCommand::Submit { ticket } => {
                    tokio::spawn(run_submission(
                        Arc::clone(&api),
                        ticket,
                        event_tx.clone(),
                    ));
                }
            }
        }
        tracing::debug!("backend command channel closed");
    })
}

/// Run one upload and report its outcome. A `SubmissionFinished` event is
/// sent even if the request task panics, so the UI always leaves Loading.
pub async fn run_submission(
    api: Arc<dyn ParseApi>,
    ticket: SubmitTicket,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
) {
    tracing::info!(file = %ticket.file.name, endpoint = api.endpoint(), "submitting resume");

    let file = ticket.file.clone();
    let request = tokio::spawn(async move { api.parse(&file).await });
    let outcome = match request.await {
        Ok(outcome) => outcome,
        Err(e) => Err(SubmitError::Aborted(e.to_string())),
    };

    if event_tx
        .send(BackendEvent::SubmissionFinished { ticket, outcome })
        .is_err()
    {
        tracing::debug!("UI gone before submission finished");
    }
}
