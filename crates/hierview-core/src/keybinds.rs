use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input modes, modeled after vim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default mode. Navigation and actions via keybinds.
    #[default]
    Normal,
    /// Typing into the search field. Entered with `/`. Exited with `Esc` or `Enter`.
    Search,
    /// Command-line mode. Entered with `:`. Supports `:q`, `:qa`.
    Command,
}

impl InputMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Search => "SEARCH",
            Self::Command => "COMMAND",
        }
    }
}

/// Actions that can result from processing a key event in Normal mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Key consumed, nothing to do.
    None,
    /// Quit the application.
    Quit,
    /// Switch to a specific input mode.
    SetMode(InputMode),
    /// Move selection down by N rows.
    MoveDown(usize),
    /// Move selection up by N rows.
    MoveUp(usize),
    /// Jump to the first row.
    GotoTop,
    /// Jump to the last row.
    GotoBottom,
    /// Half-page down.
    HalfPageDown,
    /// Half-page up.
    HalfPageUp,
    /// Toggle the current node open/closed.
    Confirm,
    /// Expand the current node.
    Expand,
    /// Collapse the current node, or jump to its parent.
    CollapseOrParent,
    /// Expand every visible node (`zR`).
    ExpandAll,
    /// Collapse every visible node (`zM`).
    CollapseAll,
    /// Focus the search field.
    Search,
    /// Clear the search query and show the whole tree again.
    ClearSearch,
    /// Show help.
    Help,
}

/// Pending key state for multi-key sequences like `gg`, `zR`, `zM`.
#[derive(Debug, Default, Clone)]
pub struct KeyState {
    /// Pending first key of a two-key sequence ('g' for gg, 'z' for zR/zM).
    pub pending_key: Option<char>,
}

impl KeyState {
    pub fn reset(&mut self) {
        self.pending_key = None;
    }
}

/// Process a key event in Normal mode, accounting for multi-key sequences.
pub fn process_normal_key(key: KeyEvent, state: &mut KeyState) -> Action {
    if let Some(pending) = state.pending_key.take() {
        return match (pending, key.code) {
            ('g', KeyCode::Char('g')) => Action::GotoTop,
            ('z', KeyCode::Char('R')) => Action::ExpandAll,
            ('z', KeyCode::Char('M')) => Action::CollapseAll,
            _ => Action::None, // Invalid sequence, ignore
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown(1),
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp(1),
        KeyCode::Char('h') | KeyCode::Left => Action::CollapseOrParent,
        KeyCode::Char('l') | KeyCode::Right => Action::Expand,
        KeyCode::Char('G') | KeyCode::End => Action::GotoBottom,
        KeyCode::Home => Action::GotoTop,
        KeyCode::Char('g') => {
            state.pending_key = Some('g');
            Action::None
        }
        KeyCode::Char('z') => {
            state.pending_key = Some('z');
            Action::None
        }
        KeyCode::Char('d') if key.modifiers == KeyModifiers::CONTROL => Action::HalfPageDown,
        KeyCode::Char('u') if key.modifiers == KeyModifiers::CONTROL => Action::HalfPageUp,
        KeyCode::PageDown => Action::HalfPageDown,
        KeyCode::PageUp => Action::HalfPageUp,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Confirm,
        KeyCode::Char('/') => Action::Search,
        KeyCode::Esc => Action::ClearSearch,
        KeyCode::Char(':') => Action::SetMode(InputMode::Command),
        KeyCode::Char('?') => Action::Help,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}
