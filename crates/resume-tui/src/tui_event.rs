use resume_core::{ParseResult, SubmitError, SubmitTicket};

/// Commands sent from the TUI to the backend.
#[derive(Debug)]
pub enum BackendCommand {
    /// Upload the ticket's file to the parse endpoint.
    Submit { ticket: SubmitTicket },
}

/// Events flowing from the backend to the TUI.
#[derive(Debug)]
pub enum BackendEvent {
    /// Exactly one per `Submit`, whatever happened to the request.
    SubmissionFinished {
        ticket: SubmitTicket,
        outcome: Result<ParseResult, SubmitError>,
    },
}
