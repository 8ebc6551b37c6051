use std::io::{self, Write};
use std::panic;

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Puts the terminal back in shell mode when dropped, including on an early
/// return from setup.
pub struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = leave_screen(&mut io::stdout());
        debug!("terminal restored");
    }
}

/// Raw mode, alternate screen, mouse capture and window title.
///
/// The guard is armed right after raw mode is enabled, so a failure in any
/// later step still restores the terminal.
pub fn setup_terminal(title: &str) -> Result<(Tui, TerminalGuard)> {
    enable_raw_mode()?;
    let guard = TerminalGuard;
    install_panic_hook();

    let mut stdout = io::stdout();
    enter_screen(&mut stdout, title)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}

/// Restore the screen before the default hook prints the panic message.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = leave_screen(&mut io::stdout());
        original_hook(info);
    }));
}

fn enter_screen(out: &mut impl Write, title: &str) -> io::Result<()> {
    execute!(out, EnterAlternateScreen, EnableMouseCapture, SetTitle(title))
}

fn leave_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, DisableMouseCapture, Show)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALT_SCREEN_ON: &str = "\x1b[?1049h";
    const ALT_SCREEN_OFF: &str = "\x1b[?1049l";
    const CURSOR_SHOW: &str = "\x1b[?25h";

    #[test]
    fn test_enter_screen_switches_and_sets_title() {
        let mut out = Vec::new();
        enter_screen(&mut out, "Hierarchy View - paths.txt").unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains(ALT_SCREEN_ON));
        assert!(written.contains("Hierarchy View - paths.txt"));
    }

    #[test]
    fn test_leave_screen_undoes_enter() {
        let mut out = Vec::new();
        leave_screen(&mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains(ALT_SCREEN_OFF));
        assert!(written.contains(CURSOR_SHOW));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_enter_screen_reports_write_failure() {
        let err = enter_screen(&mut BrokenPipe, "title").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
