use resume_core::clean_dropped_path;

use super::{App, Screen};
use crate::action::Action;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        // Ticks and resizes apply whatever is on screen
        match action {
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                return false;
            }
            Action::Resize => {
                // Page size is taken from the next render
                return false;
            }
            _ => {}
        }

        // Quit confirmation modal: q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack => {
                    self.confirm_quit = false;
                }
                _ => {}
            }
            return false;
        }

        // Help overlay
        if self.show_help {
            match action {
                Action::Quit => {
                    self.confirm_quit = true;
                }
                Action::ToggleHelp | Action::NavigateBack => {
                    self.show_help = false;
                }
                _ => {}
            }
            return false;
        }

        // A drop lands on the main screen from anywhere
        if let Action::Drop(text) = action {
            self.handle_drop(&text);
            return false;
        }

        match self.screen {
            Screen::Main => self.handle_main_action(action),
            Screen::FilePicker => self.handle_file_picker_action(action),
        }
        false
    }

    fn handle_drop(&mut self, text: &str) {
        let Some(path) = clean_dropped_path(text) else {
            tracing::debug!("ignoring paste that is not a path");
            return;
        };
        if self.select_path(&path) {
            self.screen = Screen::Main;
        }
    }

    fn handle_main_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.confirm_quit = true;
            }
            Action::NavigateBack => {
                self.notice = None;
            }
            Action::DrillIn | Action::Submit => {
                self.submit();
            }
            Action::OpenFilePicker => {
                self.file_picker.refresh_entries();
                self.screen = Screen::FilePicker;
            }
            Action::ToggleFullText => {
                if self.session.state().result().is_some() {
                    self.full_text_expanded = !self.full_text_expanded;
                }
            }
            Action::ToggleHelp => {
                self.show_help = true;
            }
            Action::MoveDown => {
                self.result_scroll = self.result_scroll.saturating_add(1);
            }
            Action::MoveUp => {
                self.result_scroll = self.result_scroll.saturating_sub(1);
            }
            Action::PageDown => {
                self.result_scroll = self.result_scroll.saturating_add(self.page_rows());
            }
            Action::PageUp => {
                self.result_scroll = self.result_scroll.saturating_sub(self.page_rows());
            }
            Action::GoTop => {
                self.result_scroll = 0;
            }
            Action::GoBottom => {
                // Clamped to the real content height at render time
                self.result_scroll = u16::MAX;
            }
            _ => {}
        }
    }

    fn page_rows(&self) -> u16 {
        u16::try_from(self.visible_rows.max(1)).unwrap_or(u16::MAX)
    }
}
