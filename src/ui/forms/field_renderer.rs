//! Field rendering utilities for forms

use crate::state::{age_options, FieldValue, FormField};
use crate::ui::widgets::render_scrollable_list;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw a single-line form field
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    // Only text fields get an insertion cursor
    let cursor = if is_active && matches!(field.value, FieldValue::Text(_)) {
        "▌"
    } else {
        ""
    };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_str, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.block(block), area);
}

/// Draw the age field. While focused it expands into the scrollable
/// option list; otherwise only the selected label is shown.
pub fn draw_age_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    if !is_active {
        draw_field(frame, area, field, false);
        return;
    }

    let items: Vec<ListItem> = age_options()
        .into_iter()
        .map(|option| ListItem::new(option.label))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" {} ", field.label))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    render_scrollable_list(frame, area, list, field.age_index());
}
