//! In-memory outline tree with explicit attach/detach.
//!
//! Nodes live in an arena and are never created or destroyed after
//! [`Tree::build`]. Filtering only detaches nodes from their parent's child
//! list (or from the root list) and reattaches them later.

use crate::parser::NestedPathMap;

/// Opaque handle to a node in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    label: String,
    /// Structural parent; kept while the node is detached.
    parent: Option<NodeId>,
    /// Currently attached children, in display order.
    children: Vec<NodeId>,
    attached: bool,
    expanded: bool,
}

impl TreeNode {
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
}

impl Tree {
    /// Build a tree from a nested path map. Siblings keep first-seen input order.
    pub fn build(map: &NestedPathMap) -> Self {
        let mut tree = Self::default();
        tree.add_level(map, None);
        tree
    }

    fn add_level(&mut self, map: &NestedPathMap, parent: Option<NodeId>) {
        for (label, below) in map.iter() {
            let id = NodeId(self.nodes.len());
            self.nodes.push(TreeNode {
                label: label.to_string(),
                parent,
                children: Vec::new(),
                attached: true,
                expanded: false,
            });
            self.siblings_mut(parent).push(id);
            self.add_level(below, Some(id));
        }
    }

    /// Total number of nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn label(&self, id: NodeId) -> &str {
        &self.nodes[id.0].label
    }

    /// Attached top-level nodes.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Attached children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].children.is_empty()
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.nodes[id.0].attached
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.nodes[id.0].expanded
    }

    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        self.nodes[id.0].expanded = expanded;
    }

    /// Expand every ancestor so the node is reachable in the outline.
    pub fn reveal(&mut self, id: NodeId) {
        let mut current = self.parent(id);
        while let Some(p) = current {
            self.nodes[p.0].expanded = true;
            current = self.nodes[p.0].parent;
        }
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Remove a node from its sibling list. Its subtree stays hanging off it.
    /// Returns false if it was already detached.
    pub fn detach(&mut self, id: NodeId) -> bool {
        if !self.nodes[id.0].attached {
            return false;
        }
        let parent = self.nodes[id.0].parent;
        let siblings = self.siblings_mut(parent);
        if let Some(pos) = siblings.iter().position(|&s| s == id) {
            siblings.remove(pos);
        }
        self.nodes[id.0].attached = false;
        true
    }

    /// Empty every sibling list and the root list at once.
    pub fn detach_all(&mut self) {
        self.roots.clear();
        for node in &mut self.nodes {
            node.children.clear();
            node.attached = false;
        }
    }

    /// Detach every attached node `keep` rejects, in one sweep over the
    /// sibling lists. Kept nodes keep their relative order.
    pub fn retain(&mut self, mut keep: impl FnMut(NodeId) -> bool) {
        let mut dropped = Vec::new();
        let lists = std::iter::once(&mut self.roots)
            .chain(self.nodes.iter_mut().map(|node| &mut node.children));
        for list in lists {
            list.retain(|&id| {
                let kept = keep(id);
                if !kept {
                    dropped.push(id);
                }
                kept
            });
        }
        for id in dropped {
            self.nodes[id.0].attached = false;
        }
    }

    /// Attach a node under `parent` (top level for `None`) at `index`,
    /// clamped to the sibling count. An attached node is moved.
    pub fn reattach(&mut self, id: NodeId, parent: Option<NodeId>, index: usize) {
        self.detach(id);
        let siblings = self.siblings_mut(parent);
        let index = index.min(siblings.len());
        siblings.insert(index, id);
        let node = &mut self.nodes[id.0];
        node.parent = parent;
        node.attached = true;
    }

    /// Depth-first pre-order walk over every node reachable from the roots.
    pub fn iter_preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    fn siblings_mut(&mut self, parent: Option<NodeId>) -> &mut Vec<NodeId> {
        match parent {
            Some(p) => &mut self.nodes[p.0].children,
            None => &mut self.roots,
        }
    }
}

pub struct Preorder<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
