pub mod help_popup;
pub mod keybinds;
pub mod line_input;
pub mod ui;
