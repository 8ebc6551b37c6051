pub mod config;
pub mod describe;
pub mod parser;
pub mod search;
pub mod tree;
pub mod view;
pub mod visibility;

use hierview_core::help_popup::HelpEntry;
use hierview_core::keybinds::{Action, InputMode, KeyState, process_normal_key};
use hierview_core::line_input::LineInput;
use hierview_core::ui;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Frame, layout::Rect};
use tracing::{debug, info};

use config::OutlineConfig;
use parser::NestedPathMap;
use search::Filter;
use tree::Tree;
use view::{OutlineRenderConfig, OutlineView};
use visibility::VisibilityIndex;

/// Default viewport height used for half-page moves before the first render.
const DEFAULT_VIEWPORT_HEIGHT: usize = 20;

/// The searchable outline: tree, filter state, rows and the search field.
pub struct OutlineTool {
    tree: Tree,
    filter: Filter,
    view: OutlineView,
    search: LineInput,
    mode: InputMode,
    key_state: KeyState,
    config: OutlineConfig,
    /// Label of the input the paths came from.
    source: String,
    viewport_height: usize,
}

impl OutlineTool {
    pub fn new(map: &NestedPathMap, source: impl Into<String>, config: OutlineConfig) -> Self {
        let tree = Tree::build(map);
        let index = VisibilityIndex::capture(&tree);
        let filter = Filter::new(index, config.match_policy);
        let mut view = OutlineView::new();
        view.rebuild(&tree);

        let source = source.into();
        info!(source = %source, nodes = tree.len(), roots = tree.roots().len(), "outline built");

        Self {
            tree,
            filter,
            view,
            search: LineInput::new(),
            mode: InputMode::Normal,
            key_state: KeyState::default(),
            config,
            source,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }

    pub fn name(&self) -> &str {
        "Outline"
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn view(&self) -> &OutlineView {
        &self.view
    }

    pub fn query(&self) -> &str {
        self.search.as_str()
    }

    /// Height of the outline area, recorded by the caller on each render.
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height.max(1);
    }

    /// Joined path of the selected node.
    pub fn focused_path(&self) -> String {
        describe::describe(&self.tree, self.view.selected_id(), &self.config.display)
    }

    /// Short summary for the status bar.
    pub fn status_info(&self) -> String {
        if self.filter.query().is_empty() {
            format!("{} nodes", self.tree.len())
        } else {
            format!(
                "{} matches, {} shown",
                self.filter.match_count(),
                self.filter.visible().len()
            )
        }
    }

    /// Replace the query and re-filter.
    pub fn set_query(&mut self, query: &str) {
        self.search.clear();
        for c in query.chars() {
            self.search.insert_char(c);
        }
        self.run_search();
    }

    /// Scroll the selection by mouse wheel notches.
    pub fn scroll(&mut self, down: bool) {
        if down {
            self.view.move_down(3);
        } else {
            self.view.move_up(3);
        }
    }

    /// Reset any pending multi-key state.
    pub fn reset_key_state(&mut self) {
        self.key_state.reset();
    }

    fn run_search(&mut self) {
        let outcome = self.filter.apply(&mut self.tree, self.search.as_str());
        self.view.rebuild(&self.tree);
        if outcome.reset_viewport {
            self.view.reset_to_top();
        }
    }

    // ── Key handling ─────────────────────────────────────────────────

    /// Handle a key event. Returns the actions the app has to act on
    /// (quit, help, command mode); everything else is consumed here.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match self.mode {
            InputMode::Search => self.handle_search_key(key),
            _ => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Action {
        let action = process_normal_key(key, &mut self.key_state);
        match action {
            Action::MoveDown(n) => self.view.move_down(n),
            Action::MoveUp(n) => self.view.move_up(n),
            Action::GotoTop => self.view.reset_to_top(),
            Action::GotoBottom => self.view.goto_bottom(),
            Action::HalfPageDown => self.view.half_page_down(self.viewport_height),
            Action::HalfPageUp => self.view.half_page_up(self.viewport_height),
            Action::Confirm => {
                self.view.toggle_selected(&mut self.tree);
            }
            Action::Expand => {
                self.view.expand_selected(&mut self.tree);
            }
            Action::CollapseOrParent => self.view.collapse_or_parent(&mut self.tree),
            Action::ExpandAll => self.view.set_all_expanded(&mut self.tree, true),
            Action::CollapseAll => self.view.set_all_expanded(&mut self.tree, false),
            Action::Search => {
                self.mode = InputMode::Search;
            }
            Action::ClearSearch => {
                if self.search.clear() {
                    debug!("search cleared");
                    self.run_search();
                }
            }
            other => return other,
        }
        Action::None
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Action {
        let changed = match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.mode = InputMode::Normal;
                false
            }
            KeyCode::Char('u') if key.modifiers == KeyModifiers::CONTROL => self.search.clear(),
            KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
                self.search.insert_char(c);
                true
            }
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Left => {
                self.search.cursor_left();
                false
            }
            KeyCode::Right => {
                self.search.cursor_right();
                false
            }
            KeyCode::Down => {
                self.view.move_down(1);
                false
            }
            KeyCode::Up => {
                self.view.move_up(1);
                false
            }
            _ => false,
        };

        if changed {
            self.run_search();
        }
        Action::None
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render the search field.
    pub fn render_search(&self, frame: &mut Frame, area: Rect) {
        ui::render_search_field(frame, area, &self.search, self.mode == InputMode::Search);
    }

    /// Render the outline.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let empty_message = if self.tree.is_empty() {
            "No paths in input."
        } else {
            "No matches."
        };
        let config = OutlineRenderConfig {
            title: &self.source,
            focused: self.mode == InputMode::Normal,
            empty_message,
        };
        view::render_outline(frame, area, &self.view, &config);
    }

    /// Keybinds specific to the outline.
    pub fn help_entries(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry::new("Outline", "j / k", "Move down / up"),
            HelpEntry::new("Outline", "gg / G", "Go to top / bottom"),
            HelpEntry::new("Outline", "Ctrl-d / Ctrl-u", "Half-page down / up"),
            HelpEntry::new("Outline", "h / l", "Collapse (or parent) / expand"),
            HelpEntry::new("Outline", "Enter", "Toggle node"),
            HelpEntry::new("Outline", "zR / zM", "Expand / collapse all"),
            HelpEntry::new("Search", "/", "Focus search field"),
            HelpEntry::new("Search", "Enter / Esc", "Back to the outline"),
            HelpEntry::new("Search", "Ctrl-u", "Clear query"),
            HelpEntry::new("Search", "Esc (outline)", "Clear search"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn tool(lines: &[&str]) -> OutlineTool {
        OutlineTool::new(&parse(lines), "test", OutlineConfig::default())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(tool: &mut OutlineTool, s: &str) {
        for c in s.chars() {
            tool.handle_key(press(KeyCode::Char(c)));
        }
    }

    fn row_labels(tool: &OutlineTool) -> Vec<String> {
        tool.view().rows().iter().map(|r| r.label.clone()).collect()
    }

    #[test]
    fn test_starts_collapsed() {
        let tool = tool(&["/a/b/c.conf", "/a/b/d.conf"]);
        assert_eq!(row_labels(&tool), vec!["/"]);
        assert_eq!(tool.mode(), InputMode::Normal);
        assert_eq!(tool.status_info(), "5 nodes");
    }

    #[test]
    fn test_search_filters_on_every_keystroke() {
        let mut tool = tool(&["/a/b/c.conf", "/a/b/d.conf", "/x/y"]);
        tool.handle_key(press(KeyCode::Char('/')));
        assert_eq!(tool.mode(), InputMode::Search);

        type_str(&mut tool, "c.");
        assert_eq!(tool.query(), "c.");
        assert_eq!(row_labels(&tool), vec!["/", "a", "b", "c.conf"]);
        assert_eq!(tool.view().selected(), 0);
        assert_eq!(tool.status_info(), "1 matches, 4 shown");

        // Backspace widens the search again
        tool.handle_key(press(KeyCode::Backspace));
        assert_eq!(row_labels(&tool), vec!["/", "a", "b", "c.conf", "d.conf"]);
    }

    #[test]
    fn test_enter_keeps_filter() {
        let mut tool = tool(&["/a/b/c.conf", "/a/b/d.conf"]);
        tool.handle_key(press(KeyCode::Char('/')));
        type_str(&mut tool, "d.conf");
        tool.handle_key(press(KeyCode::Enter));

        assert_eq!(tool.mode(), InputMode::Normal);
        assert_eq!(row_labels(&tool), vec!["/", "a", "b", "d.conf"]);
    }

    #[test]
    fn test_esc_in_normal_clears_search() {
        let mut tool = tool(&["/a/b/c.conf", "/a/b/d.conf"]);
        tool.set_query("d.conf");
        assert_eq!(tool.filter().visible().len(), 4);

        tool.handle_key(press(KeyCode::Esc));
        assert_eq!(tool.query(), "");
        assert_eq!(tool.filter().visible().len(), 5);
        // Cleared query collapses everything again
        assert_eq!(row_labels(&tool), vec!["/"]);
    }

    #[test]
    fn test_focused_path() {
        let mut tool = tool(&["/a/b/c.conf"]);
        tool.set_query("c.conf");
        tool.handle_key(press(KeyCode::Char('G')));
        assert_eq!(tool.focused_path(), "a::b::c.conf");
    }

    #[test]
    fn test_navigation_keys() {
        let mut tool = tool(&["r/a", "r/b"]);
        tool.handle_key(press(KeyCode::Enter));
        assert_eq!(row_labels(&tool), vec!["r", "a", "b"]);

        tool.handle_key(press(KeyCode::Char('j')));
        tool.handle_key(press(KeyCode::Char('j')));
        assert_eq!(tool.view().selected_row().unwrap().label, "b");

        tool.handle_key(press(KeyCode::Char('h')));
        assert_eq!(tool.view().selected_row().unwrap().label, "r");

        tool.handle_key(press(KeyCode::Char('z')));
        tool.handle_key(press(KeyCode::Char('M')));
        assert_eq!(row_labels(&tool), vec!["r"]);
    }

    #[test]
    fn test_hub_actions_are_returned() {
        let mut tool = tool(&["a"]);
        assert_eq!(tool.handle_key(press(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(tool.handle_key(press(KeyCode::Char('?'))), Action::Help);
        assert_eq!(
            tool.handle_key(press(KeyCode::Char(':'))),
            Action::SetMode(InputMode::Command)
        );
        assert_eq!(tool.handle_key(press(KeyCode::Char('j'))), Action::None);
    }

    #[test]
    fn test_search_ignores_modified_chars() {
        let mut tool = tool(&["a/w.conf", "a/x.conf"]);
        tool.handle_key(press(KeyCode::Char('/')));
        tool.handle_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        tool.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        assert_eq!(tool.query(), "");
        assert_eq!(tool.filter().visible().len(), 3);

        tool.handle_key(KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT));
        assert_eq!(tool.query(), "W");
        assert_eq!(tool.filter().match_count(), 1);
    }

    #[test]
    fn test_search_mode_swallows_hub_keys() {
        let mut tool = tool(&["quit/q"]);
        tool.handle_key(press(KeyCode::Char('/')));
        assert_eq!(tool.handle_key(press(KeyCode::Char('q'))), Action::None);
        assert_eq!(tool.query(), "q");
    }
}
