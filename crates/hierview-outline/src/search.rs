//! Incremental search: restore, match, promote ancestors, hide the rest.

use std::collections::HashSet;

use tracing::debug;

use crate::config::MatchPolicy;
use crate::tree::{NodeId, Tree};
use crate::visibility::VisibilityIndex;

/// Result of one filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Nodes whose own label matched.
    pub matches: usize,
    /// Matches plus their ancestors.
    pub visible: usize,
    /// Whether the outline should jump back to the top.
    pub reset_viewport: bool,
}

/// Search state owned by the outline: the baseline index, the last query and
/// the visible set it produced.
#[derive(Debug, Clone)]
pub struct Filter {
    index: VisibilityIndex,
    policy: MatchPolicy,
    query: String,
    visible: HashSet<NodeId>,
    matches: usize,
}

impl Filter {
    /// Start with everything in the index visible.
    pub fn new(index: VisibilityIndex, policy: MatchPolicy) -> Self {
        let visible = index.nodes().collect();
        Self {
            index,
            policy,
            query: String::new(),
            visible,
            matches: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn index(&self) -> &VisibilityIndex {
        &self.index
    }

    pub fn visible(&self) -> &HashSet<NodeId> {
        &self.visible
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.visible.contains(&id)
    }

    /// Number of nodes that matched on their own in the last pass.
    pub fn match_count(&self) -> usize {
        self.matches
    }

    /// Re-filter the tree for `query`, starting from the fully restored tree.
    pub fn apply(&mut self, tree: &mut Tree, query: &str) -> FilterOutcome {
        self.index.restore(tree);

        let needle = query.to_lowercase();
        let found = find_matches(tree, &needle, self.policy);

        let mut visible = HashSet::with_capacity(found.len());
        for &id in &found {
            visible.insert(id);
            visible.extend(tree.ancestors(id));
        }

        tree.retain(|id| visible.contains(&id));

        self.query = query.to_string();
        self.matches = found.len();
        self.visible = visible;

        debug!(
            query = %self.query,
            matches = self.matches,
            visible = self.visible.len(),
            "filter applied"
        );

        if self.visible.is_empty() {
            return FilterOutcome {
                matches: 0,
                visible: 0,
                reset_viewport: false,
            };
        }

        if query.is_empty() {
            for &id in &self.visible {
                tree.set_expanded(id, false);
            }
        } else {
            for &id in &self.visible {
                tree.reveal(id);
            }
        }

        FilterOutcome {
            matches: self.matches,
            visible: self.visible.len(),
            reset_viewport: true,
        }
    }
}

/// Depth-first walk collecting nodes whose lower-cased label contains `needle`.
fn find_matches(tree: &Tree, needle: &str, policy: MatchPolicy) -> Vec<NodeId> {
    tree.iter_preorder()
        .filter(|&id| policy == MatchPolicy::Any || tree.is_leaf(id))
        .filter(|&id| tree.label(id).to_lowercase().contains(needle))
        .collect()
}
