use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Label used for standard input, in the title and the outline border.
pub const STDIN_LABEL: &str = "/dev/stdin";

/// Where the path list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Positional words are joined with spaces into one filename; no words
    /// means standard input.
    pub fn from_args(words: &[String]) -> Self {
        if words.is_empty() {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(words.join(" ")))
        }
    }

    pub fn label(&self) -> String {
        match self {
            InputSource::Stdin => STDIN_LABEL.to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    /// Read every line. A file that cannot be opened is an error.
    pub fn read_lines(&self) -> Result<Vec<String>> {
        match self {
            InputSource::Stdin => read_lines_from(io::stdin().lock())
                .context("Failed to read paths from standard input"),
            InputSource::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open input file {}", path.display()))?;
                read_lines_from(BufReader::new(file))
                    .with_context(|| format!("Failed to read input file {}", path.display()))
            }
        }
    }
}

/// Collect lines exactly as read, terminators (`\n` or `\r\n`) included.
/// Only the last line may lack one.
pub fn read_lines_from(mut reader: impl BufRead) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        lines.push(line);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hierview_outline::parser::parse;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};

    #[test]
    fn test_labels() {
        assert_eq!(InputSource::Stdin.label(), "/dev/stdin");
        assert_eq!(
            InputSource::File(PathBuf::from("some file.txt")).label(),
            "some file.txt"
        );
    }

    #[test]
    fn test_from_args() {
        assert_eq!(InputSource::from_args(&[]), InputSource::Stdin);
        let words = vec!["a".to_string(), "b.txt".to_string()];
        assert_eq!(
            InputSource::from_args(&words),
            InputSource::File(PathBuf::from("a b.txt"))
        );
    }

    #[test]
    fn test_read_lines_keeps_terminators() {
        let input = Cursor::new("/a/b\r\n\n ./c \n/d");
        let lines = read_lines_from(input).unwrap();
        assert_eq!(lines, vec!["/a/b\r\n", "\n", " ./c \n", "/d"]);
    }

    #[test]
    fn test_unterminated_last_line_is_a_distinct_leaf() {
        let lines = read_lines_from(Cursor::new("/a/b\n/a/b")).unwrap();
        let map = parse(&lines);
        let a = map.get("/").and_then(|root| root.get("a")).unwrap();
        let leaves: Vec<&str> = a.iter().map(|(label, _)| label).collect();
        assert_eq!(leaves, vec!["b\n", "b"]);
    }

    #[test]
    fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "/etc/hosts").unwrap();
        writeln!(file, "/etc/passwd").unwrap();

        let source = InputSource::File(file.path().to_path_buf());
        let lines = source.read_lines().unwrap();
        assert_eq!(lines, vec!["/etc/hosts\n", "/etc/passwd\n"]);
    }

    #[test]
    fn test_empty_file_is_not_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let source = InputSource::File(file.path().to_path_buf());
        assert!(source.read_lines().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = InputSource::File(dir.path().join("missing.txt"));
        let err = source.read_lines().unwrap_err();
        assert!(format!("{err:#}").contains("Failed to open input file"));
    }
}
