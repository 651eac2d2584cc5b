//! Medical-record file browser rendering

use crate::app::App;
use crate::state::{FileEntry, ACCEPTED_EXTENSIONS};
use crate::ui::widgets::render_scrollable_list;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the record file browser
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let browser = &app.state.file_browser;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Listing
            Constraint::Length(1), // Accept filter footer
        ])
        .split(area);

    let items: Vec<ListItem> = browser.entries.iter().map(entry_item).collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Medical Records: {} ", browser.current_dir.display()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    render_scrollable_list(frame, chunks[0], list, browser.selected_index);

    let accepted = ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(" ");
    let footer = Paragraph::new(Line::from(format!(
        " Accepted: {accepted}  (all files remain selectable)"
    )))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[1]);
}

fn entry_item(entry: &FileEntry) -> ListItem<'static> {
    let (label, style) = if entry.is_dir {
        (
            format!("{}/", entry.name),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
    } else if entry.matches_accepted() {
        (entry.name.clone(), Style::default())
    } else {
        // Outside the advisory filter but still selectable
        (entry.name.clone(), Style::default().fg(Color::DarkGray))
    };

    let meta = if entry.is_dir {
        String::new()
    } else {
        let modified = entry
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        format!("{:>10}  {modified}", format_size(entry.size))
    };

    ListItem::new(Line::from(vec![
        Span::styled(format!("{label:<40}"), style),
        Span::styled(meta, Style::default().fg(Color::DarkGray)),
    ]))
}

/// Human-readable file size for the listing
fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
