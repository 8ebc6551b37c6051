use crate::keybinds::InputMode;
use crate::line_input::LineInput;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const SEARCH_LABEL: &str = "Search: ";

/// Render the top title bar.
pub fn render_title_bar(frame: &mut Frame, area: Rect, title: &str) {
    let line = Line::from(Span::styled(
        format!(" {} ", title),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the search field. The terminal cursor is placed in it when `focused`.
pub fn render_search_field(frame: &mut Frame, area: Rect, input: &LineInput, focused: bool) {
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let line = Line::from(vec![
        Span::styled(SEARCH_LABEL, label_style),
        Span::raw(input.as_str().to_string()),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    if focused {
        let cursor_x = area.x + SEARCH_LABEL.len() as u16 + input.cursor_column();
        if cursor_x < area.x + area.width {
            frame.set_cursor_position((cursor_x, area.y));
        }
    }
}

/// Render the bottom status bar showing the current mode and optional info.
pub fn render_status_bar(frame: &mut Frame, area: Rect, mode: InputMode, label: &str, info: &str) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(" "),
        Span::styled(label.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(info.to_string(), Style::default().add_modifier(Modifier::DIM)),
    ]);

    let bar = Paragraph::new(line).style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_widget(bar, area);
}

/// Render the command-line input at the bottom of the screen.
pub fn render_command_line(frame: &mut Frame, area: Rect, input: &LineInput) {
    let line = Line::from(vec![
        Span::styled(":", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(input.as_str().to_string()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
    frame.set_cursor_position((area.x + 1 + input.cursor_column(), area.y));
}

/// Standard layout: title bar + search field + main content + status bar.
/// Returns (title_area, search_area, content_area, status_area).
pub fn standard_layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let [title_area, search_area, content_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    (title_area, search_area, content_area, status_area)
}

/// Create a standard bordered block for a content view.
pub fn tool_block(title: &str, focused: bool) -> Block<'_> {
    let border_color = if focused { Color::Blue } else { Color::DarkGray };
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}
