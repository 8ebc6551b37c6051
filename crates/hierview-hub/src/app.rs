use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::Frame;
use tracing::{debug, info};

use hierview_core::{
    help_popup::{GLOBAL_HELP, HelpPopup},
    keybinds::{Action, InputMode},
    line_input::LineInput,
    ui,
};
use hierview_outline::OutlineTool;

/// The main application state.
pub struct App {
    outline: OutlineTool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Hub-level input mode; only Normal or Command.
    mode: InputMode,
    help_popup: HelpPopup,
    command_input: LineInput,
}

impl App {
    pub fn new(outline: OutlineTool) -> Self {
        Self {
            outline,
            should_quit: false,
            mode: InputMode::Normal,
            help_popup: HelpPopup::new(),
            command_input: LineInput::new(),
        }
    }

    /// Terminal title for the current input.
    pub fn title(&self) -> String {
        format!("Hierarchy View - {}", self.outline.source())
    }

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => self.outline.scroll(true),
                MouseEventKind::ScrollUp => self.outline.scroll(false),
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl-c always quits
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.should_quit = true;
            return;
        }

        if self.help_popup.is_visible() {
            self.handle_help_key(key);
            return;
        }

        if self.mode == InputMode::Command {
            self.handle_command_key(key);
            return;
        }

        let action = self.outline.handle_key(key);
        self.process_action(action);
    }

    /// Process an action the outline handed back.
    fn process_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::SetMode(InputMode::Command) => {
                self.mode = InputMode::Command;
                self.command_input.clear();
            }
            Action::Help => {
                self.show_help();
            }
            _ => {}
        }
    }

    /// Handle command-mode key events.
    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = InputMode::Normal;
                self.command_input.clear();
            }
            KeyCode::Enter => {
                let cmd = self.command_input.take();
                self.mode = InputMode::Normal;
                self.execute_command(cmd.trim());
            }
            KeyCode::Char(c) => self.command_input.insert_char(c),
            KeyCode::Backspace => {
                // Backspace on an empty line leaves command mode, like vim
                if !self.command_input.backspace() {
                    self.mode = InputMode::Normal;
                }
            }
            KeyCode::Left => self.command_input.cursor_left(),
            KeyCode::Right => self.command_input.cursor_right(),
            _ => {}
        }
    }

    /// Execute a command-mode command.
    fn execute_command(&mut self, cmd: &str) {
        match cmd {
            "q" | "quit" | "qa" | "qa!" | "q!" => {
                info!(command = cmd, "quit requested");
                self.should_quit = true;
            }
            "" => {}
            other => {
                debug!(command = other, "unknown command");
            }
        }
    }

    /// Show the help popup with outline + global keybinds.
    fn show_help(&mut self) {
        self.outline.reset_key_state();
        let mut entries = self.outline.help_entries();
        entries.extend(GLOBAL_HELP);
        self.help_popup
            .show(format!("{} Help", self.outline.name()), entries);
    }

    /// Handle key events while the help popup is visible.
    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.help_popup.hide();
            }
            KeyCode::Char('j') | KeyCode::Down => self.help_popup.scroll_down(1),
            KeyCode::Char('k') | KeyCode::Up => self.help_popup.scroll_up(1),
            KeyCode::Char('d') if key.modifiers == KeyModifiers::CONTROL => {
                self.help_popup.scroll_down(10)
            }
            KeyCode::Char('u') if key.modifiers == KeyModifiers::CONTROL => {
                self.help_popup.scroll_up(10)
            }
            _ => {}
        }
    }

    /// Render the entire application.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let (title_area, search_area, content_area, status_area) = ui::standard_layout(area);

        ui::render_title_bar(frame, title_area, &self.title());
        self.outline.render_search(frame, search_area);

        // Rows inside the border
        self.outline
            .set_viewport_height(content_area.height.saturating_sub(2) as usize);
        self.outline.render(frame, content_area);

        if self.mode == InputMode::Command {
            ui::render_command_line(frame, status_area, &self.command_input);
        } else {
            let path = self.outline.focused_path();
            let info = format!("{}  ?:help  :q quit", self.outline.status_info());
            ui::render_status_bar(frame, status_area, self.outline.mode(), &path, &info);
        }

        // Overlays (rendered last, on top)
        self.help_popup.render(frame, area);
    }
}
