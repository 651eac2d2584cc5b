//! Application state definitions

use super::file_browser::FileBrowserState;
use super::forms::PatientForm;
use serde::Serialize;
use std::path::PathBuf;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Form,
    FileBrowser,
}

/// Submission payload handed to the sink once validation passes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientRecord {
    pub name: String,
    pub age: u32,
    pub file: Option<PathBuf>,
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // The one in-progress intake form
    pub form: PatientForm,

    // Record file picker
    pub file_browser: FileBrowserState,

    // Queued error messages, shown one at a time as a modal dialog
    errors: Vec<String>,
}

impl AppState {
    /// Push an error message to the queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Whether an error dialog is currently blocking input
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The error currently shown, if any
    pub fn current_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    /// Dismiss the currently shown error
    pub fn dismiss_error(&mut self) {
        if !self.errors.is_empty() {
            self.errors.remove(0);
        }
    }
}
