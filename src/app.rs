//! Application state and core logic

use crate::config::IntakeConfig;
use crate::state::{AppState, Form, View};
use crate::submission::{LogSink, SubmissionSink};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fs;
use std::path::PathBuf;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Submission boundary for completed forms
    sink: Box<dyn SubmissionSink>,
    /// User configuration, persisted when browser settings change
    config: IntakeConfig,
    /// Whether the app should quit
    quit: bool,
    /// Ephemeral acknowledgement shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance with the default diagnostic sink
    pub fn new(config: IntakeConfig) -> Self {
        Self::with_sink(config, Box::new(LogSink))
    }

    /// Create an App with a custom submission sink
    pub fn with_sink(config: IntakeConfig, sink: Box<dyn SubmissionSink>) -> Self {
        let mut state = AppState::default();

        let start_dir = config
            .records_dir
            .as_ref()
            .map(PathBuf::from)
            .filter(|p| p.is_dir())
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        state.file_browser.current_dir = fs::canonicalize(&start_dir).unwrap_or(start_dir);
        state.file_browser.show_hidden = config.show_hidden_files.unwrap_or(false);

        Self {
            state,
            sink,
            config,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message);
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any acknowledgement on key press
        self.status_message = None;

        match self.state.current_view {
            View::Form => self.handle_form_key(key).await?,
            View::FileBrowser => self.handle_file_browser_key(key),
        }

        Ok(())
    }

    /// Handle keys in the intake form view
    async fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let active = self.state.form.active_field();
        let on_submit_row = self.state.form.is_submit_row_active();
        // Field order: 0=name, 1=age, 2=file, 3=submit button row

        match key.code {
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            // Submit shortcut works from anywhere in the form
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit_patient().await;
            }
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Up => {
                if active == 1 {
                    self.state.form.age_select_prev(1);
                } else {
                    self.state.form.prev_field();
                }
            }
            KeyCode::Down => {
                if active == 1 {
                    self.state.form.age_select_next(1);
                } else {
                    self.state.form.next_field();
                }
            }
            KeyCode::PageUp if active == 1 => self.state.form.age_select_prev(10),
            KeyCode::PageDown if active == 1 => self.state.form.age_select_next(10),
            KeyCode::Enter => match active {
                2 => self.open_file_browser(),
                3 => self.submit_patient().await,
                _ => self.state.form.next_field(),
            },
            // Form field input (only when not on the submit row)
            KeyCode::Char(c) if !on_submit_row => self
                .state
                .form
                .input_char(c, key.modifiers.contains(KeyModifiers::SHIFT)),
            KeyCode::Backspace if !on_submit_row => {
                self.state.form.get_active_field_mut().pop_char();
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the record file browser view
    fn handle_file_browser_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.file_browser.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.file_browser.move_up(),
            KeyCode::Char('.') => match self.state.file_browser.toggle_hidden() {
                Ok(()) => {
                    self.config.show_hidden_files = Some(self.state.file_browser.show_hidden);
                    if let Err(err) = self.config.save() {
                        tracing::warn!("failed to persist config: {err}");
                    }
                }
                Err(err) => self.push_browse_error(err),
            },
            KeyCode::Enter => match self.state.file_browser.enter_selected() {
                Ok(Some(path)) => {
                    self.state.form.select_file(path);
                    self.state.current_view = View::Form;
                }
                Ok(None) => {}
                Err(err) => self.push_browse_error(err),
            },
            KeyCode::Esc => self.state.current_view = View::Form,
            _ => {}
        }
    }

    /// Open the file browser on the configured records directory
    fn open_file_browser(&mut self) {
        match self.state.file_browser.read_directory() {
            Ok(()) => self.state.current_view = View::FileBrowser,
            Err(err) => self.push_browse_error(err),
        }
    }

    fn push_browse_error(&mut self, err: anyhow::Error) {
        let dir = self.state.file_browser.current_dir.display().to_string();
        tracing::warn!("failed to read {dir}: {err}");
        self.push_error(format!("Failed to read {dir}: {err}"));
    }

    /// Validate the form and hand the record to the submission sink.
    ///
    /// On validation failure the error dialog is queued and the form is
    /// left untouched. On success the form stays populated and editable;
    /// only the acknowledgement marks the handoff.
    async fn submit_patient(&mut self) {
        match self.state.form.to_record() {
            Ok(record) => match self.sink.submit(&record).await {
                Ok(id) => {
                    self.status_message = Some(format!("Patient information submitted ({id})"));
                }
                Err(err) => self.push_error(format!("Submission failed: {err}")),
            },
            Err(err) => self.push_error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PatientRecord;
    use crate::submission::MockSubmissionSink;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn test_app() -> App {
        App::new(IntakeConfig::default())
    }

    fn app_with_sink(sink: MockSubmissionSink) -> App {
        App::with_sink(IntakeConfig::default(), Box::new(sink))
    }

    fn rejecting_sink() -> MockSubmissionSink {
        let mut sink = MockSubmissionSink::new();
        sink.expect_submit().times(0);
        sink
    }

    async fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    fn fill_valid_form(app: &mut App) {
        for c in "Jane Doe".chars() {
            app.state.form.name.push_char(c);
        }
        app.state.form.age.set_age_index(35); // 34 years
    }

    mod navigation {
        use super::*;

        #[tokio::test]
        async fn test_tab_cycles_through_four_slots() {
            let mut app = test_app();
            for expected in [1, 2, 3, 0] {
                app.handle_key(key(KeyCode::Tab)).await.unwrap();
                assert_eq!(app.state.form.active_field(), expected);
            }
        }

        #[tokio::test]
        async fn test_backtab_wraps_to_submit_row() {
            let mut app = test_app();
            app.handle_key(key(KeyCode::BackTab)).await.unwrap();
            assert_eq!(app.state.form.active_field(), 3);
        }

        #[tokio::test]
        async fn test_enter_on_name_moves_to_next_field() {
            let mut app = test_app();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.form.active_field(), 1);
        }

        #[tokio::test]
        async fn test_ctrl_q_quits() {
            let mut app = test_app();
            assert!(!app.should_quit());
            app.handle_key(ctrl('q')).await.unwrap();
            assert!(app.should_quit());
        }
    }

    mod editing {
        use super::*;

        #[tokio::test]
        async fn test_typed_characters_land_in_name() {
            let mut app = test_app();
            type_str(&mut app, "Jane").await;
            assert_eq!(app.state.form.name.as_text(), "Jane");
        }

        #[tokio::test]
        async fn test_backspace_edits_name() {
            let mut app = test_app();
            type_str(&mut app, "Janee").await;
            app.handle_key(key(KeyCode::Backspace)).await.unwrap();
            assert_eq!(app.state.form.name.as_text(), "Jane");
        }

        #[tokio::test]
        async fn test_age_arrows_move_selection() {
            let mut app = test_app();
            app.handle_key(key(KeyCode::Tab)).await.unwrap(); // to age
            app.handle_key(key(KeyCode::Down)).await.unwrap();
            app.handle_key(key(KeyCode::Down)).await.unwrap();
            app.handle_key(key(KeyCode::Up)).await.unwrap();
            assert_eq!(app.state.form.age.age_index(), 1); // "0 years"
        }

        #[tokio::test]
        async fn test_age_page_keys_jump_by_ten() {
            let mut app = test_app();
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(key(KeyCode::PageDown)).await.unwrap();
            assert_eq!(app.state.form.age.age_index(), 10);
            app.handle_key(key(KeyCode::PageUp)).await.unwrap();
            assert_eq!(app.state.form.age.age_index(), 0);
        }

        #[tokio::test]
        async fn test_typing_on_submit_row_is_ignored() {
            let mut app = test_app();
            app.state.form.set_active_field(3);
            type_str(&mut app, "zz").await;
            assert_eq!(app.state.form.name.as_text(), "");
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_submit_with_empty_name_is_rejected() {
            let mut app = app_with_sink(rejecting_sink());
            app.handle_key(ctrl('s')).await.unwrap();

            assert!(app.state.has_errors());
            assert!(app.state.current_error().unwrap().contains("name"));
            assert!(app.status_message.is_none());
        }

        #[tokio::test]
        async fn test_submit_without_age_is_rejected_and_state_kept() {
            let mut app = app_with_sink(rejecting_sink());
            type_str(&mut app, "Jane").await;
            app.handle_key(ctrl('s')).await.unwrap();

            assert!(app.state.current_error().unwrap().contains("age"));
            assert_eq!(app.state.form.name.as_text(), "Jane");
            assert_eq!(app.state.form.age.age_index(), 0);
        }

        #[tokio::test]
        async fn test_valid_submit_hands_record_to_sink() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_submit()
                .withf(|record: &PatientRecord| {
                    record.name == "Jane Doe" && record.age == 34 && record.file.is_none()
                })
                .times(1)
                .returning(|_| Ok("sub-1".to_string()));

            let mut app = app_with_sink(sink);
            fill_valid_form(&mut app);
            app.handle_key(ctrl('s')).await.unwrap();

            assert!(!app.state.has_errors());
            assert_eq!(
                app.status_message.as_deref(),
                Some("Patient information submitted (sub-1)")
            );
        }

        #[tokio::test]
        async fn test_submit_succeeds_without_file_and_form_stays_populated() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_submit()
                .times(1)
                .returning(|_| Ok("sub-2".to_string()));

            let mut app = app_with_sink(sink);
            fill_valid_form(&mut app);
            app.state.form.set_active_field(3);
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            // No reset after success: the form remains editable as-is
            assert_eq!(app.state.form.name.as_text(), "Jane Doe");
            assert_eq!(app.state.form.age.age_index(), 35);
        }

        #[tokio::test]
        async fn test_sink_error_surfaces_in_dialog() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_submit()
                .times(1)
                .returning(|_| Err(anyhow::anyhow!("sink offline")));

            let mut app = app_with_sink(sink);
            fill_valid_form(&mut app);
            app.handle_key(ctrl('s')).await.unwrap();

            assert!(app.state.current_error().unwrap().contains("sink offline"));
            assert_eq!(app.state.form.name.as_text(), "Jane Doe");
        }

        #[tokio::test]
        async fn test_acknowledgement_clears_on_next_key() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_submit().returning(|_| Ok("sub-3".to_string()));

            let mut app = app_with_sink(sink);
            fill_valid_form(&mut app);
            app.handle_key(ctrl('s')).await.unwrap();
            assert!(app.status_message.is_some());

            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            assert!(app.status_message.is_none());
        }
    }

    mod error_dialog {
        use super::*;

        #[tokio::test]
        async fn test_dialog_swallows_input_until_dismissed() {
            let mut app = test_app();
            app.push_error("boom");

            type_str(&mut app, "x").await;
            assert_eq!(app.state.form.name.as_text(), "");
            assert!(app.state.has_errors());

            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(!app.state.has_errors());
        }

        #[tokio::test]
        async fn test_esc_also_dismisses() {
            let mut app = test_app();
            app.push_error("boom");
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(!app.state.has_errors());
        }
    }

    mod file_picking {
        use super::*;
        use std::fs::File;
        use tempfile::TempDir;

        fn app_over_dir() -> (TempDir, App) {
            let tmp = TempDir::new().unwrap();
            File::create(tmp.path().join("scan.jpg")).unwrap();
            File::create(tmp.path().join("notes.txt")).unwrap();

            let config = IntakeConfig {
                records_dir: Some(tmp.path().to_string_lossy().to_string()),
                ..Default::default()
            };
            let app = App::with_sink(config, Box::new(LogSink));
            (tmp, app)
        }

        // The browser canonicalizes its start directory, so expectations
        // must compare against the canonical form of the temp dir
        fn canonical(tmp: &TempDir, name: &str) -> std::path::PathBuf {
            fs::canonicalize(tmp.path()).unwrap().join(name)
        }

        async fn open_browser(app: &mut App) {
            app.state.form.set_active_field(2);
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.current_view, View::FileBrowser);
        }

        async fn select_entry(app: &mut App, name: &str) {
            let index = app
                .state
                .file_browser
                .entries
                .iter()
                .position(|e| e.name == name)
                .unwrap();
            app.state.file_browser.selected_index = index;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
        }

        #[tokio::test]
        async fn test_picking_a_file_fills_the_form_field() {
            let (tmp, mut app) = app_over_dir();
            open_browser(&mut app).await;
            select_entry(&mut app, "scan.jpg").await;

            assert_eq!(app.state.current_view, View::Form);
            assert_eq!(
                app.state.form.file.as_file(),
                Some(canonical(&tmp, "scan.jpg").as_path())
            );
        }

        #[tokio::test]
        async fn test_file_outside_accept_filter_is_still_selectable() {
            let (tmp, mut app) = app_over_dir();
            open_browser(&mut app).await;
            select_entry(&mut app, "notes.txt").await;

            assert_eq!(
                app.state.form.file.as_file(),
                Some(canonical(&tmp, "notes.txt").as_path())
            );
        }

        #[tokio::test]
        async fn test_picking_twice_replaces_the_selection() {
            let (tmp, mut app) = app_over_dir();
            open_browser(&mut app).await;
            select_entry(&mut app, "scan.jpg").await;

            open_browser(&mut app).await;
            select_entry(&mut app, "notes.txt").await;

            assert_eq!(
                app.state.form.file.as_file(),
                Some(canonical(&tmp, "notes.txt").as_path())
            );
        }

        #[tokio::test]
        async fn test_esc_cancels_without_touching_selection() {
            let (_tmp, mut app) = app_over_dir();
            open_browser(&mut app).await;
            app.handle_key(key(KeyCode::Esc)).await.unwrap();

            assert_eq!(app.state.current_view, View::Form);
            assert!(app.state.form.file.as_file().is_none());
        }

        #[tokio::test]
        async fn test_backspace_on_file_field_clears_selection() {
            let (_tmp, mut app) = app_over_dir();
            open_browser(&mut app).await;
            select_entry(&mut app, "scan.jpg").await;

            app.state.form.set_active_field(2);
            app.handle_key(key(KeyCode::Backspace)).await.unwrap();
            assert!(app.state.form.file.as_file().is_none());
        }
    }
}
