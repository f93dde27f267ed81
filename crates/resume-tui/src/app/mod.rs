mod backend;
mod update;
mod update_file_picker;

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

use resume_core::{DocumentKind, SelectedFile, SubmitError, UploadSession};

use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Which screen is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Drop zone, submit button and result panels.
    Main,
    FilePicker,
}

/// State for the file picker screen.
#[derive(Debug, Clone)]
pub struct FilePickerState {
    /// Current directory being browsed.
    pub current_dir: PathBuf,
    /// Entries in the current directory (dirs first, then documents).
    pub entries: Vec<FileEntry>,
    /// Cursor position in the entries list.
    pub cursor: usize,
}

/// A single entry in the file picker.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    /// `Some` for documents the parser accepts.
    pub kind: Option<DocumentKind>,
}

impl FilePickerState {
    pub fn new() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::at(current_dir)
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        let mut state = Self {
            current_dir: dir.into(),
            entries: Vec::new(),
            cursor: 0,
        };
        state.refresh_entries();
        state
    }

    /// Refresh the entries list from the current directory.
    /// Only directories and PDF/DOCX files are listed.
    pub fn refresh_entries(&mut self) {
        let mut entries = Vec::new();

        // Parent directory entry
        if let Some(parent) = self.current_dir.parent() {
            entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
                kind: None,
            });
        }

        if let Ok(read_dir) = std::fs::read_dir(&self.current_dir) {
            let mut dirs = Vec::new();
            let mut files = Vec::new();

            for entry in read_dir.flatten() {
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().to_string();

                // Skip hidden files/dirs
                if name.starts_with('.') {
                    continue;
                }

                if path.is_dir() {
                    dirs.push(FileEntry {
                        name,
                        path,
                        is_dir: true,
                        kind: None,
                    });
                } else if let Some(kind) = DocumentKind::from_path(&path) {
                    files.push(FileEntry {
                        name,
                        path,
                        is_dir: false,
                        kind: Some(kind),
                    });
                }
            }

            dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

            entries.extend(dirs);
            entries.extend(files);
        }

        self.entries = entries;
        self.cursor = 0;
    }

    pub fn current(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }

    /// Enter the directory at cursor, or return false if not a directory.
    pub fn enter_directory(&mut self) -> bool {
        if let Some(entry) = self.entries.get(self.cursor)
            && entry.is_dir
        {
            self.current_dir = entry.path.clone();
            self.refresh_entries();
            return true;
        }
        false
    }
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub session: UploadSession,
    pub theme: Theme,
    /// Parse endpoint, shown in the header.
    pub endpoint: String,
    pub tick: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,
    /// Full-text panel starts collapsed for every new result.
    pub full_text_expanded: bool,
    pub result_scroll: u16,
    /// Height of the scrollable result area (set on resize, used for page up/down).
    pub visible_rows: usize,
    /// Last rejected drop/pick, shown until the next accepted selection.
    pub notice: Option<String>,
    pub file_picker: FilePickerState,
    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(theme: Theme, endpoint: String) -> Self {
        Self {
            screen: Screen::Main,
            session: UploadSession::new(),
            theme,
            endpoint,
            tick: 0,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            full_text_expanded: false,
            result_scroll: 0,
            visible_rows: 10,
            notice: None,
            file_picker: FilePickerState::new(),
            backend_cmd_tx: None,
        }
    }

    /// Try to make `path` the selected resume. Returns whether it was accepted;
    /// a rejection is kept in `notice` and leaves the session untouched.
    pub fn select_path(&mut self, path: &Path) -> bool {
        match SelectedFile::from_path(path) {
            Ok(file) => {
                self.session.select_file(file);
                self.notice = None;
                self.full_text_expanded = false;
                self.result_scroll = 0;
                true
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "rejected file");
                self.notice = Some(e.to_string());
                false
            }
        }
    }

    /// Start a submission if one is allowed; otherwise do nothing.
    pub fn submit(&mut self) {
        let Some(ticket) = self.session.begin_submit() else {
            return;
        };
        self.full_text_expanded = false;
        self.result_scroll = 0;

        let Some(tx) = &self.backend_cmd_tx else {
            self.session.finish(
                ticket,
                Err(SubmitError::Aborted("backend is not running".into())),
            );
            return;
        };
        if let Err(mpsc::error::SendError(BackendCommand::Submit { ticket })) =
            tx.send(BackendCommand::Submit { ticket })
        {
            self.session.finish(
                ticket,
                Err(SubmitError::Aborted("backend is not running".into())),
            );
        }
    }

    /// Render the current screen.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();

        match self.screen {
            Screen::Main => crate::view::upload::render_in(f, self, area),
            Screen::FilePicker => crate::view::file_picker::render_in(f, self, area),
        }

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }

        if self.confirm_quit {
            crate::view::quit_confirm::render(f, &self.theme);
        }
    }
}

#[cfg(test)]
mod tests;
