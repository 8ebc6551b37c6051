/// Which nodes a search query can match on its own.
///
/// Ancestors of a match are always shown; the policy only decides whether an
/// interior node whose label happens to contain the query counts as a match.
/// A matched interior node is shown without its unmatched children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Only leaves (terminal path components) can match.
    #[default]
    Leaf,
    /// Any node whose label contains the query matches.
    Any,
}

/// How the focused node's path is rendered in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathDisplay {
    /// Joins the labels from root to focused node.
    pub separator: String,
    /// Leave out a blank root (e.g. `/`) so the path has no leading separator.
    pub strip_blank_root: bool,
}

impl Default for PathDisplay {
    fn default() -> Self {
        Self {
            separator: String::from("::"),
            strip_blank_root: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineConfig {
    pub display: PathDisplay,
    pub match_policy: MatchPolicy,
}
