//! Patient intake form rendering

use super::field_renderer::{draw_age_field, draw_field};
use crate::app::App;
use crate::state::{Form, ACCEPTED_EXTENSIONS};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of the expanded age option list
const AGE_LIST_HEIGHT: u16 = 9;

/// Draw the patient information form
pub fn draw_patient_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let active = form.active_field();

    // The age field grows into an option list while focused
    let age_height = if active == 1 { AGE_LIST_HEIGHT } else { 3 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Patient name
            Constraint::Length(age_height),    // Age
            Constraint::Length(3),             // Medical records
            Constraint::Length(1),             // Accept filter hint
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let block = Block::default()
        .title(" Patient Information ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    draw_field(frame, chunks[0], &form.name, active == 0);
    draw_age_field(frame, chunks[1], &form.age, active == 1);
    draw_field(frame, chunks[2], &form.file, active == 2);
    draw_accept_hint(frame, chunks[3]);
    // The button dims until the required fields are populated; submitting
    // anyway surfaces the validation dialog
    render_button(
        frame,
        chunks[4],
        "Submit Information",
        form.is_submit_row_active(),
        form.validate().is_ok(),
    );
}

/// One-line reminder of the accepted record types; the filter is a hint,
/// the browser lets any file through
fn draw_accept_hint(frame: &mut Frame, area: Rect) {
    let accepted = ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(" ");

    let hint = Paragraph::new(Line::from(format!(
        " Accepted: {accepted}  (Enter opens the record browser)"
    )))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, area);
}
