//! UI module for rendering the TUI

mod components;
mod file_browser;
mod forms;
mod layout;
mod widgets;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (header_area, content_area) = layout::create_layout(area);
    layout::draw_header(frame, header_area);

    // Draw main content based on current view
    match app.state.current_view {
        View::Form => forms::draw_patient_form(frame, content_area, app),
        View::FileBrowser => file_browser::draw(frame, content_area, app),
    }

    // Draw status bar
    layout::draw_status_bar(frame, app);

    // Error dialog overlays everything else
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
