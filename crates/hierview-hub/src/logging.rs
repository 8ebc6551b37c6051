use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::ValueEnum;
use directories::ProjectDirs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

/// Returns the default log file path.
/// Location: `~/.local/share/hierview/hierview.log` (XDG-compliant)
pub fn default_log_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "hierview").context("Could not determine data directory")?;
    Ok(dirs.data_dir().join("hierview.log"))
}

/// Install the global tracing subscriber, writing to a file since the
/// terminal belongs to the UI. `Silent` installs nothing.
pub fn setup_tracing(level: LogLevel, log_file: Option<&Path>) -> Result<()> {
    let Some(level) = level.to_tracing_level() else {
        return Ok(());
    };

    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None => default_log_path()?,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file at {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .compact()
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::Debug.to_tracing_level(), Some(tracing::Level::DEBUG));
        assert_eq!(LogLevel::Warn.to_tracing_level(), Some(tracing::Level::WARN));
        assert_eq!(LogLevel::Silent.to_tracing_level(), None);
    }

    #[test]
    fn test_silent_installs_nothing() {
        // A bogus path is never touched when logging is off
        let result = setup_tracing(LogLevel::Silent, Some(Path::new("/nonexistent/dir/x.log")));
        assert!(result.is_ok());
    }
}
