use crate::config::PathDisplay;
use crate::parser::SEPARATOR;
use crate::tree::{NodeId, Tree};

/// Label with any trailing line terminators removed.
pub fn display_label(label: &str) -> &str {
    label.trim_end_matches(['\r', '\n'])
}

/// A root is blank when nothing but whitespace and path separators remain.
fn is_blank_root(label: &str) -> bool {
    label
        .chars()
        .all(|c| c.is_whitespace() || c == SEPARATOR)
}

/// Full path of the focused node, from its root down, joined with the
/// configured separator.
pub fn describe(tree: &Tree, focused: Option<NodeId>, display: &PathDisplay) -> String {
    let Some(focused) = focused else {
        return String::new();
    };

    let mut chain: Vec<&str> = std::iter::once(focused)
        .chain(tree.ancestors(focused))
        .map(|id| display_label(tree.label(id)))
        .collect();
    chain.reverse();

    if display.strip_blank_root && chain.first().is_some_and(|root| is_blank_root(root)) {
        chain.remove(0);
    }

    chain.join(&display.separator)
}
