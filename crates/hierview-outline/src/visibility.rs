//! Snapshot of the fully attached tree, used to undo filtering.

use hashlink::LinkedHashMap;

use crate::tree::{NodeId, Tree};

/// Every node mapped to the parent it had at capture time; roots map to
/// themselves. Entries are in depth-first pre-order.
#[derive(Debug, Clone, Default)]
pub struct VisibilityIndex {
    parents: LinkedHashMap<NodeId, NodeId>,
}

impl VisibilityIndex {
    /// Record the current structure of everything reachable from the roots.
    pub fn capture(tree: &Tree) -> Self {
        let mut parents = LinkedHashMap::new();
        for id in tree.iter_preorder() {
            parents.insert(id, tree.parent(id).unwrap_or(id));
        }
        Self { parents }
    }

    /// Reattach every indexed node to its recorded parent, in capture order.
    ///
    /// Everything is unlinked first and then appended back in pre-order,
    /// which rebuilds the captured sibling order in one pass whatever the
    /// tree looked like before.
    pub fn restore(&self, tree: &mut Tree) {
        tree.detach_all();
        for (&id, &parent) in &self.parents {
            let parent = (parent != id).then_some(parent);
            tree.reattach(id, parent, usize::MAX);
        }
    }

    /// Recorded parent of a node; `None` for roots and unknown nodes.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied().filter(|&p| p != id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.parents.contains_key(&id)
    }

    /// Indexed nodes in capture order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.parents.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn snapshot(tree: &Tree) -> Vec<(String, Option<NodeId>, Vec<NodeId>)> {
        tree.iter_preorder()
            .map(|id| {
                (
                    tree.label(id).to_string(),
                    tree.parent(id),
                    tree.children(id).to_vec(),
                )
            })
            .collect()
    }

    #[test]
    fn test_capture_records_roots_as_themselves() {
        let tree = Tree::build(&parse(["/a", "b"]));
        let index = VisibilityIndex::capture(&tree);
        assert_eq!(index.len(), 3);

        let slash = tree.roots()[0];
        let b = tree.roots()[1];
        let a = tree.children(slash)[0];
        assert_eq!(index.parent_of(slash), None);
        assert_eq!(index.parent_of(b), None);
        assert_eq!(index.parent_of(a), Some(slash));
        assert_eq!(index.nodes().collect::<Vec<_>>(), vec![slash, a, b]);
    }

    #[test]
    fn test_restore_after_detaching_everything() {
        let mut tree = Tree::build(&parse(["/a/b/c", "/a/d", "e/f"]));
        let index = VisibilityIndex::capture(&tree);
        let before = snapshot(&tree);

        let all: Vec<NodeId> = index.nodes().collect();
        for id in all {
            tree.detach(id);
        }
        assert!(tree.roots().is_empty());

        index.restore(&mut tree);
        assert_eq!(snapshot(&tree), before);
    }

    #[test]
    fn test_restore_undoes_reordering() {
        let mut tree = Tree::build(&parse(["r/a", "r/b", "r/c", "s"]));
        let index = VisibilityIndex::capture(&tree);
        let before = snapshot(&tree);

        let r = tree.roots()[0];
        let a = tree.children(r)[0];
        let s = tree.roots()[1];
        tree.reattach(a, Some(r), 5);
        tree.reattach(s, None, 0);
        let first = tree.children(r)[0];
        tree.detach(first);
        assert_ne!(snapshot(&tree), before);

        index.restore(&mut tree);
        assert_eq!(snapshot(&tree), before);
    }

    #[test]
    fn test_restore_wide_directory_keeps_order() {
        let names: Vec<String> = (0..5_000).map(|i| format!("dir/f{i:05}")).collect();
        let mut tree = Tree::build(&parse(&names));
        let index = VisibilityIndex::capture(&tree);
        let before = snapshot(&tree);

        let dir = tree.roots()[0];
        let kids: Vec<NodeId> = tree.children(dir).iter().copied().step_by(2).collect();
        for id in kids {
            tree.detach(id);
        }
        assert_eq!(tree.children(dir).len(), 2_500);

        for _ in 0..3 {
            index.restore(&mut tree);
        }
        assert_eq!(snapshot(&tree), before);
    }

    #[test]
    fn test_empty_index() {
        let mut tree = Tree::build(&parse(Vec::<&str>::new()));
        let index = VisibilityIndex::capture(&tree);
        assert!(index.is_empty());
        index.restore(&mut tree);
        assert!(tree.roots().is_empty());
    }
}
