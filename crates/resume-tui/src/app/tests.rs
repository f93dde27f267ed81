use std::fs;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use resume_core::{ParseResult, SubmissionState, SubmitTicket};
use tempfile::TempDir;

use super::*;
use crate::action::Action;
use crate::tui_event::BackendEvent;

/// Create a minimal App for testing (no backend).
fn test_app() -> App {
    App::new(Theme::hacker(), "http://localhost:8000/api/parse".into())
}

/// App wired to a command channel, as `main` does.
fn connected_app() -> (App, mpsc::UnboundedReceiver<BackendCommand>) {
    let mut app = test_app();
    let (tx, rx) = mpsc::unbounded_channel();
    app.backend_cmd_tx = Some(tx);
    (app, rx)
}

fn resume_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cv.pdf"), b"%PDF-1.4").unwrap();
    fs::write(dir.path().join("Other.DOCX"), b"PK").unwrap();
    fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
    fs::write(dir.path().join(".hidden.pdf"), b"%PDF").unwrap();
    fs::create_dir(dir.path().join("archive")).unwrap();
    dir
}

/// Submit and take the ticket the backend would have received.
fn submit_and_take(
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<BackendCommand>,
) -> SubmitTicket {
    app.update(Action::Submit);
    let BackendCommand::Submit { ticket } = rx.try_recv().unwrap();
    ticket
}

fn render(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| app.view(f)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .chunks(width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parsed result whose full text wraps to many rows and ends in `END-MARKER`.
fn long_resume() -> ParseResult {
    let word = "x".repeat(30);
    let mut text: Vec<String> = (0..30).map(|_| format!("{word} {word} {word}")).collect();
    text.push("END-MARKER".into());
    ParseResult {
        full_text: Some(text.join("\n")),
        ..jane_doe()
    }
}

/// Select cv.pdf, submit it and deliver `outcome` for it.
fn finish_with(
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<BackendCommand>,
    dir: &TempDir,
    outcome: Result<ParseResult, SubmitError>,
) {
    app.select_path(&dir.path().join("cv.pdf"));
    let ticket = submit_and_take(app, rx);
    app.handle_backend_event(BackendEvent::SubmissionFinished { ticket, outcome });
}

fn jane_doe() -> ParseResult {
    ParseResult {
        name: Some("Jane Doe".into()),
        email: Some("jane@example.com".into()),
        phone: Some("+1 555 0100".into()),
        match_score: Some(87.0),
        skills: Some(vec!["Python".into()]),
        education: Some(vec![]),
        experience: Some(vec![]),
        full_text: Some("Jane Doe\n\tSenior Engineer\nPython, SQL".into()),
    }
}

// ── Intake ─────────────────────────────────────────────────────

#[test]
fn fresh_app_shows_drop_zone_and_no_results() {
    let mut app = test_app();
    let screen = render(&mut app, 100, 40);
    assert!(screen.contains("Drag & drop resume here"));
    assert!(screen.contains("Parse Resume"));
    assert!(!screen.contains("Selected:"));
    assert!(!screen.contains("Personal Information"));
}

#[test]
fn pasted_path_selects_file() {
    let dir = resume_dir();
    let mut app = test_app();
    let pasted = format!("'{}'\n", dir.path().join("cv.pdf").display());

    app.update(Action::Drop(pasted));

    assert_eq!(app.session.selected().unwrap().name, "cv.pdf");
    assert!(app.notice.is_none());
    assert!(render(&mut app, 100, 40).contains("Selected: cv.pdf"));
}

#[test]
fn rejected_drop_keeps_previous_selection() {
    let dir = resume_dir();
    let mut app = test_app();
    assert!(app.select_path(&dir.path().join("cv.pdf")));

    app.update(Action::Drop(dir.path().join("notes.txt").display().to_string()));

    assert_eq!(app.session.selected().unwrap().name, "cv.pdf");
    assert!(app.notice.is_some());
    app.update(Action::NavigateBack);
    assert!(app.notice.is_none());
}

#[test]
fn drop_from_file_picker_returns_to_main() {
    let dir = resume_dir();
    let mut app = test_app();
    app.update(Action::OpenFilePicker);
    assert_eq!(app.screen, Screen::FilePicker);

    app.update(Action::Drop(dir.path().join("Other.DOCX").display().to_string()));

    assert_eq!(app.screen, Screen::Main);
    assert_eq!(app.session.selected().unwrap().name, "Other.DOCX");
}

// ── Submission ─────────────────────────────────────────────────

#[test]
fn submit_without_file_sends_nothing() {
    let (mut app, mut rx) = connected_app();
    app.update(Action::Submit);
    assert!(rx.try_recv().is_err());
    assert_eq!(app.session.state(), &SubmissionState::Idle);
}

#[test]
fn submit_while_loading_sends_once() {
    let dir = resume_dir();
    let (mut app, mut rx) = connected_app();
    app.select_path(&dir.path().join("cv.pdf"));

    app.update(Action::Submit);
    app.update(Action::DrillIn);

    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
    assert!(app.session.state().is_loading());
    assert!(render(&mut app, 100, 40).contains("Processing..."));
}

#[test]
fn submit_without_backend_fails_instead_of_hanging() {
    let dir = resume_dir();
    let mut app = test_app();
    app.select_path(&dir.path().join("cv.pdf"));

    app.update(Action::Submit);

    assert!(!app.session.state().is_loading());
    assert_eq!(
        app.session.state().error(),
        Some("Submission aborted: backend is not running")
    );
}

#[test]
fn successful_parse_renders_result_panels() {
    let dir = resume_dir();
    let (mut app, mut rx) = connected_app();
    app.select_path(&dir.path().join("cv.pdf"));
    let ticket = submit_and_take(&mut app, &mut rx);

    app.handle_backend_event(BackendEvent::SubmissionFinished {
        ticket,
        outcome: Ok(jane_doe()),
    });

    let screen = render(&mut app, 100, 40);
    assert!(screen.contains("Personal Information"));
    assert!(screen.contains("Jane Doe"));
    assert!(screen.contains("jane@example.com"));
    assert!(screen.contains("87%"));
    assert!(screen.contains(" Python "));
    assert!(screen.contains("No education details found"));
    assert!(screen.contains("No experience ranges found"));
    assert!(screen.contains("Full Resume Text"));
    assert!(!screen.contains("Senior Engineer"));
    assert!(!screen.contains(" Error "));
}

#[test]
fn full_text_expands_and_collapses() {
    let dir = resume_dir();
    let (mut app, mut rx) = connected_app();
    app.select_path(&dir.path().join("cv.pdf"));
    let ticket = submit_and_take(&mut app, &mut rx);
    app.handle_backend_event(BackendEvent::SubmissionFinished {
        ticket,
        outcome: Ok(jane_doe()),
    });

    app.update(Action::ToggleFullText);
    let screen = render(&mut app, 100, 40);
    assert!(screen.contains("Senior Engineer"));
    assert!(screen.contains("Python, SQL"));

    app.update(Action::ToggleFullText);
    assert!(!render(&mut app, 100, 40).contains("Senior Engineer"));
}

#[test]
fn empty_result_renders_every_fallback() {
    let dir = resume_dir();
    let (mut app, mut rx) = connected_app();
    app.select_path(&dir.path().join("cv.pdf"));
    let ticket = submit_and_take(&mut app, &mut rx);
    app.handle_backend_event(BackendEvent::SubmissionFinished {
        ticket,
        outcome: Ok(ParseResult::default()),
    });
    app.update(Action::ToggleFullText);

    let screen = render(&mut app, 100, 40);
    assert_eq!(screen.matches("N/A").count(), 3);
    assert!(screen.contains("0%"));
    assert!(screen.contains("No relevant skills found"));
    assert!(screen.contains("No education details found"));
    assert!(screen.contains("No experience ranges found"));
    assert!(screen.contains("No text available"));
}

#[test]
fn server_detail_is_shown_without_results() {
    let dir = resume_dir();
    let (mut app, mut rx) = connected_app();
    app.select_path(&dir.path().join("cv.pdf"));
    let ticket = submit_and_take(&mut app, &mut rx);

    app.handle_backend_event(BackendEvent::SubmissionFinished {
        ticket,
        outcome: Err(SubmitError::Server {
            status: 400,
            detail: "Unsupported file type".into(),
        }),
    });

    let screen = render(&mut app, 100, 40);
    assert!(screen.contains("Unsupported file type"));
    assert!(!screen.contains("Personal Information"));
    assert!(app.session.can_submit());
}

#[tokio::test]
async fn network_failure_is_shown_without_results() {
    let dir = resume_dir();
    let (mut app, mut rx) = connected_app();
    app.select_path(&dir.path().join("cv.pdf"));

    // Bind then release a port so nothing is listening on it
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let api = resume_core::HttpParseApi::new(format!("http://{addr}/api/parse"));
    let outcome = resume_core::ParseApi::parse(&api, app.session.selected().unwrap()).await;
    assert!(matches!(outcome, Err(SubmitError::Transport(_))));

    let ticket = submit_and_take(&mut app, &mut rx);
    app.handle_backend_event(BackendEvent::SubmissionFinished { ticket, outcome });

    let screen = render(&mut app, 100, 40);
    assert!(screen.contains("Network error"));
    assert!(!screen.contains("Personal Information"));
    assert!(!screen.contains("Match Score"));
    assert!(app.session.can_submit());
}

#[test]
fn new_selection_clears_shown_result() {
    let dir = resume_dir();
    let (mut app, mut rx) = connected_app();
    app.select_path(&dir.path().join("cv.pdf"));
    let ticket = submit_and_take(&mut app, &mut rx);
    app.handle_backend_event(BackendEvent::SubmissionFinished {
        ticket,
        outcome: Ok(jane_doe()),
    });

    app.select_path(&dir.path().join("Other.DOCX"));

    assert_eq!(app.session.state(), &SubmissionState::Idle);
    assert!(!render(&mut app, 100, 40).contains("Jane Doe"));
}

#[test]
fn response_for_superseded_selection_is_dropped() {
    let dir = resume_dir();
    let (mut app, mut rx) = connected_app();
    app.select_path(&dir.path().join("cv.pdf"));
    let ticket = submit_and_take(&mut app, &mut rx);

    app.select_path(&dir.path().join("Other.DOCX"));
    assert!(app.session.state().is_loading());

    app.handle_backend_event(BackendEvent::SubmissionFinished {
        ticket,
        outcome: Ok(jane_doe()),
    });

    assert_eq!(app.session.state(), &SubmissionState::Idle);
    assert_eq!(app.session.selected().unwrap().name, "Other.DOCX");
}

// ── Scrolling ──────────────────────────────────────────────────

#[test]
fn scroll_is_clamped_to_content() {
    let dir = resume_dir();
    let (mut app, mut rx) = connected_app();
    app.select_path(&dir.path().join("cv.pdf"));
    let ticket = submit_and_take(&mut app, &mut rx);
    app.handle_backend_event(BackendEvent::SubmissionFinished {
        ticket,
        outcome: Ok(jane_doe()),
    });

    app.update(Action::GoBottom);
    render(&mut app, 100, 40);
    // Collapsed content fits in the details panel
    assert_eq!(app.result_scroll, 0);

    app.update(Action::MoveUp);
    assert_eq!(app.result_scroll, 0);
}

#[test]
fn end_of_wrapped_full_text_is_reachable() {
    let dir = resume_dir();
    let (mut app, mut rx) = connected_app();
    finish_with(&mut app, &mut rx, &dir, Ok(long_resume()));
    app.update(Action::ToggleFullText);

    app.update(Action::GoBottom);
    let screen = render(&mut app, 60, 40);
    assert!(screen.contains("END-MARKER"));
    assert!(app.result_scroll > 0);

    // Paging past the end stays clamped with the last line in view
    for _ in 0..50 {
        app.update(Action::PageDown);
    }
    assert!(render(&mut app, 60, 40).contains("END-MARKER"));
}

#[test]
fn page_size_follows_rendered_details_height() {
    let dir = resume_dir();
    let (mut app, mut rx) = connected_app();
    finish_with(&mut app, &mut rx, &dir, Ok(long_resume()));
    app.update(Action::ToggleFullText);
    // A rejected drop adds the notice row above the results
    app.update(Action::Drop(dir.path().join("notes.txt").display().to_string()));
    assert!(app.notice.is_some());

    render(&mut app, 100, 40);
    // 40 rows minus header, intro, drop zone, notice, button, footer (13),
    // personal info and gauge (6), and the details borders (2)
    assert_eq!(app.visible_rows, 19);

    app.update(Action::PageDown);
    assert_eq!(app.result_scroll, 19);
    app.update(Action::PageUp);
    assert_eq!(app.result_scroll, 0);
}

// ── Modals ─────────────────────────────────────────────────────

#[test]
fn quit_needs_confirmation() {
    let mut app = test_app();
    assert!(!app.update(Action::Quit));
    assert!(app.confirm_quit);
    assert!(render(&mut app, 100, 40).contains("Quit resume viewer?"));

    app.update(Action::NavigateBack);
    assert!(!app.confirm_quit);

    app.update(Action::Quit);
    assert!(app.update(Action::Quit));
    assert!(app.should_quit);
}

#[test]
fn help_overlay_toggles() {
    let mut app = test_app();
    app.update(Action::ToggleHelp);
    assert!(app.show_help);
    assert!(render(&mut app, 100, 40).contains("Keyboard Shortcuts"));

    // Keys other than close are swallowed
    app.update(Action::OpenFilePicker);
    assert_eq!(app.screen, Screen::Main);

    app.update(Action::ToggleHelp);
    assert!(!app.show_help);
}

// ── File picker ────────────────────────────────────────────────

#[test]
fn picker_lists_dirs_then_documents() {
    let dir = resume_dir();
    let picker = FilePickerState::at(dir.path());
    let names: Vec<&str> = picker.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["..", "archive", "cv.pdf", "Other.DOCX"]);
    assert_eq!(picker.entries[3].kind, Some(DocumentKind::Docx));
}

#[test]
fn picker_enter_on_document_selects_and_returns() {
    let dir = resume_dir();
    let mut app = test_app();
    app.file_picker = FilePickerState::at(dir.path());
    app.screen = Screen::FilePicker;

    app.update(Action::GoBottom);
    app.update(Action::DrillIn);

    assert_eq!(app.screen, Screen::Main);
    assert_eq!(app.session.selected().unwrap().name, "Other.DOCX");
}

#[test]
fn picker_enter_on_directory_descends() {
    let dir = resume_dir();
    let mut app = test_app();
    app.file_picker = FilePickerState::at(dir.path());
    app.screen = Screen::FilePicker;

    app.update(Action::MoveDown);
    app.update(Action::DrillIn);

    assert_eq!(app.screen, Screen::FilePicker);
    assert_eq!(app.file_picker.current_dir, dir.path().join("archive"));
    assert!(app.session.selected().is_none());

    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::Main);
}
