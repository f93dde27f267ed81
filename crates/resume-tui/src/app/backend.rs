use super::App;
use crate::tui_event::BackendEvent;

impl App {
    /// Process an event from the backend listener.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::SubmissionFinished { ticket, outcome } => {
                if let Err(e) = &outcome
                    && let Some(status) = e.status()
                {
                    tracing::debug!(status, "parse endpoint returned an error status");
                }
                self.session.finish(ticket, outcome);
                self.full_text_expanded = false;
                self.result_scroll = 0;
            }
        }
    }
}
