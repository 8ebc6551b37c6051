use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// One keybind line, grouped under a section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpEntry {
    pub section: &'static str,
    pub key: &'static str,
    pub description: &'static str,
}

impl HelpEntry {
    pub const fn new(section: &'static str, key: &'static str, description: &'static str) -> Self {
        Self {
            section,
            key,
            description,
        }
    }
}

/// Keybinds that work regardless of what the outline is doing.
pub const GLOBAL_HELP: [HelpEntry; 5] = [
    HelpEntry::new("Other", ":", "Command mode"),
    HelpEntry::new("Other", ":q / :qa", "Quit"),
    HelpEntry::new("Other", "?", "This help"),
    HelpEntry::new("Other", "q", "Quit"),
    HelpEntry::new("Other", "Ctrl-c", "Force quit"),
];

const FOOTER: &str = " Esc/q/?  close    j/k  scroll";

#[derive(Debug, Default)]
pub struct HelpPopup {
    title: String,
    entries: Vec<HelpEntry>,
    scroll: u16,
}

impl HelpPopup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Open with `entries` in display order; consecutive entries sharing a
    /// section are listed under one header.
    pub fn show(&mut self, title: impl Into<String>, entries: Vec<HelpEntry>) {
        self.title = title.into();
        self.entries = entries;
        self.scroll = 0;
    }

    pub fn hide(&mut self) {
        *self = Self::default();
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Draw centered over `area`. Nothing is drawn while hidden.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.is_visible() {
            return;
        }

        let lines = self.build_lines();
        let content_height = lines.len() as u16;
        let popup = centered_rect(
            area.width.saturating_sub(8).min(60),
            area.height.saturating_sub(6).min(content_height + 2),
            area,
        );

        // Last line pinned to the bottom border at most
        let inner_height = popup.height.saturating_sub(2);
        let scroll = self.scroll.min(content_height.saturating_sub(inner_height));

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL);

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), popup);
    }

    fn build_lines(&self) -> Vec<Line<'static>> {
        let header = Style::new().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let key = Style::new().add_modifier(Modifier::BOLD);

        let mut lines = Vec::new();
        let mut previous = None;
        for entry in &self.entries {
            if previous != Some(entry.section) {
                if previous.is_some() {
                    lines.push(Line::default());
                }
                lines.push(Line::styled(format!(" {}", entry.section), header));
                previous = Some(entry.section);
            }
            lines.push(Line::from(vec![
                Span::styled(format!("  {:>15}  ", entry.key), key),
                Span::raw(entry.description),
            ]));
        }

        lines.push(Line::default());
        lines.push(Line::styled(FOOTER, Style::new().add_modifier(Modifier::DIM)));
        lines
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_section_headers_inserted_once() {
        let mut popup = HelpPopup::new();
        popup.show(
            "Help",
            vec![
                HelpEntry::new("Outline", "j / k", "Move down / up"),
                HelpEntry::new("Outline", "gg", "Go to top"),
                HelpEntry::new("Search", "/", "Search"),
            ],
        );

        let lines = popup.build_lines();
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts.iter().filter(|t| t.as_str() == " Outline").count(), 1);
        assert_eq!(texts.iter().filter(|t| t.as_str() == " Search").count(), 1);
        // header + 2 entries + blank + header + entry + blank + footer
        assert_eq!(lines.len(), 8);
        assert_eq!(texts.last().map(String::as_str), Some(FOOTER));
    }

    #[test]
    fn test_hide_resets_state() {
        let mut popup = HelpPopup::new();
        assert!(!popup.is_visible());
        popup.show("Help", GLOBAL_HELP.to_vec());
        popup.scroll_down(3);
        assert!(popup.is_visible());
        popup.hide();
        assert!(!popup.is_visible());
        assert_eq!(popup.scroll, 0);
        assert!(popup.title.is_empty());
    }

    #[test]
    fn test_scroll_up_saturates() {
        let mut popup = HelpPopup::new();
        popup.scroll_down(2);
        popup.scroll_up(5);
        assert_eq!(popup.scroll, 0);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(20, 10, area);
        assert_eq!(rect, Rect::new(40, 15, 20, 10));
    }
}
