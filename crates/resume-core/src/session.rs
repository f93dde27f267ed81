//! Upload session: the selected file plus the submission state machine.
//!
//! ```text
//!            select_file                 begin_submit
//!   Idle ◄──────────────── any ──┐   Idle/Succeeded/Failed ──► Loading
//!                                │
//!   Loading ── finish(Ok) ──► Succeeded      (same selection)
//!   Loading ── finish(Err) ─► Failed         (same selection)
//!   Loading ── finish(_) ───► Idle           (selection changed meanwhile)
//! ```

use crate::SubmitError;
use crate::document::SelectedFile;
use crate::result::ParseResult;

/// Where the current submission stands. Exactly one variant at a time, so
/// a result and an error can never be shown together.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Succeeded(ParseResult),
    Failed(String),
}

impl SubmissionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&ParseResult> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Handed out by [`UploadSession::begin_submit`]; identifies the request
/// whose outcome is later passed to [`UploadSession::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub file: SelectedFile,
    generation: u64,
}

/// State owned by one upload view.
#[derive(Debug, Clone, Default)]
pub struct UploadSession {
    selected: Option<SelectedFile>,
    state: SubmissionState,
    /// Bumped on every accepted selection.
    generation: u64,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Whether the submit action is currently enabled.
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.state.is_loading()
    }

    /// Replace the selected file and drop any shown result or error.
    ///
    /// An in-flight request keeps the session in `Loading` (it cannot be
    /// cancelled), but its outcome no longer belongs to the selection and
    /// is discarded by [`finish`](Self::finish).
    pub fn select_file(&mut self, file: SelectedFile) {
        tracing::debug!(file = %file.name, kind = file.kind.label(), "file selected");
        self.selected = Some(file);
        self.generation = self.generation.wrapping_add(1);
        if !self.state.is_loading() {
            self.state = SubmissionState::Idle;
        }
    }

    /// Enter `Loading` and hand out a ticket for the request, or `None` when
    /// there is nothing to submit or a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if !self.can_submit() {
            return None;
        }
        let file = self.selected.clone()?;
        self.state = SubmissionState::Loading;
        Some(SubmitTicket {
            file,
            generation: self.generation,
        })
    }

    /// Record the outcome of the request identified by `ticket`.
    /// Always leaves `Loading`.
    pub fn finish(&mut self, ticket: SubmitTicket, outcome: Result<ParseResult, SubmitError>) {
        if ticket.generation != self.generation {
            tracing::info!(file = %ticket.file.name, "discarding response for superseded selection");
            self.state = SubmissionState::Idle;
            return;
        }

        self.state = match outcome {
            Ok(result) => {
                tracing::info!(file = %ticket.file.name, score = ?result.match_score, "resume parsed");
                SubmissionState::Succeeded(result)
            }
            Err(err) => {
                tracing::warn!(file = %ticket.file.name, error = %err, "resume submission failed");
                SubmissionState::Failed(err.to_string())
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::document::DocumentKind;

    fn file(name: &str) -> SelectedFile {
        SelectedFile {
            path: PathBuf::from(format!("/tmp/{name}")),
            name: name.to_string(),
            kind: DocumentKind::from_path(std::path::Path::new(name)).unwrap(),
        }
    }

    #[test]
    fn starts_idle_without_selection() {
        let session = UploadSession::new();
        assert!(session.selected().is_none());
        assert_eq!(session.state(), &SubmissionState::Idle);
        assert!(!session.can_submit());
    }

    #[test]
    fn submit_without_file_is_noop() {
        let mut session = UploadSession::new();
        assert!(session.begin_submit().is_none());
        assert_eq!(session.state(), &SubmissionState::Idle);
    }

    #[test]
    fn submit_while_loading_is_noop() {
        let mut session = UploadSession::new();
        session.select_file(file("cv.pdf"));
        assert!(session.begin_submit().is_some());
        assert!(session.state().is_loading());
        assert!(session.begin_submit().is_none());
        assert!(!session.can_submit());
    }

    #[test]
    fn selection_keeps_only_latest_file() {
        let mut session = UploadSession::new();
        for name in ["a.pdf", "b.docx", "c.pdf"] {
            session.select_file(file(name));
        }
        assert_eq!(session.selected().map(|f| f.name.as_str()), Some("c.pdf"));
    }

    #[test]
    fn success_then_new_selection_clears_result() {
        let mut session = UploadSession::new();
        session.select_file(file("cv.pdf"));
        let ticket = session.begin_submit().unwrap();
        session.finish(
            ticket,
            Ok(ParseResult {
                name: Some("Jane Doe".into()),
                ..Default::default()
            }),
        );
        assert_eq!(
            session.state().result().and_then(|r| r.name.as_deref()),
            Some("Jane Doe")
        );

        session.select_file(file("other.docx"));
        assert_eq!(session.state(), &SubmissionState::Idle);
    }

    #[test]
    fn failure_then_new_selection_clears_error() {
        let mut session = UploadSession::new();
        session.select_file(file("cv.pdf"));
        let ticket = session.begin_submit().unwrap();
        session.finish(ticket, Err(SubmitError::Status(500)));
        assert_eq!(
            session.state().error(),
            Some("Request failed with status code 500")
        );
        assert!(session.state().result().is_none());

        session.select_file(file("cv.pdf"));
        assert!(session.state().error().is_none());
    }

    #[test]
    fn resubmission_passes_through_loading() {
        let mut session = UploadSession::new();
        session.select_file(file("cv.pdf"));
        let ticket = session.begin_submit().unwrap();
        session.finish(ticket, Err(SubmitError::Status(503)));

        let ticket = session.begin_submit().unwrap();
        assert_eq!(session.state(), &SubmissionState::Loading);
        assert!(session.state().error().is_none());
        session.finish(ticket, Ok(ParseResult::default()));
        assert!(session.state().result().is_some());
    }

    #[test]
    fn response_for_superseded_selection_is_discarded() {
        let mut session = UploadSession::new();
        session.select_file(file("old.pdf"));
        let ticket = session.begin_submit().unwrap();

        session.select_file(file("new.pdf"));
        // The old request is still in flight; no second one may start.
        assert!(session.state().is_loading());
        assert!(session.begin_submit().is_none());

        session.finish(ticket, Ok(ParseResult::default()));
        assert_eq!(session.state(), &SubmissionState::Idle);
        assert_eq!(session.selected().map(|f| f.name.as_str()), Some("new.pdf"));
        assert!(session.can_submit());
    }
}
