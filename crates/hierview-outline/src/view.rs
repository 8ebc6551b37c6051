//! Flattened outline rows, cursor navigation and rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use hierview_core::ui::tool_block;

use crate::describe::display_label;
use crate::tree::{NodeId, Tree};

// ── Row ──────────────────────────────────────────────────────────────

/// One visible line of the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: NodeId,
    pub depth: usize,
    pub label: String,
    pub is_expanded: bool,
    pub has_children: bool,
    /// For each depth level 0..depth, whether a vertical guide line (│) should
    /// be drawn: true when the ancestor at that depth has more siblings below.
    pub guide_depths: Vec<bool>,
}

// ── OutlineView ──────────────────────────────────────────────────────

/// Projection of the attached tree into rows, plus the cursor.
#[derive(Debug, Default)]
pub struct OutlineView {
    rows: Vec<Row>,
    selected: usize,
}

impl OutlineView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.selected)
    }

    pub fn selected_id(&self) -> Option<NodeId> {
        self.selected_row().map(|r| r.id)
    }

    /// Rebuild rows from the tree, keeping the selection on the same node if
    /// it is still shown.
    pub fn rebuild(&mut self, tree: &Tree) {
        let old_id = self.selected_id();
        self.rows.clear();
        flatten(tree, tree.roots(), 0, &[], &mut self.rows);

        if let Some(id) = old_id {
            if let Some(pos) = self.rows.iter().position(|r| r.id == id) {
                self.selected = pos;
                return;
            }
        }
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    /// Put the cursor back on the first row.
    pub fn reset_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn move_down(&mut self, n: usize) {
        let last = self.rows.len().saturating_sub(1);
        self.selected = (self.selected + n).min(last);
    }

    pub fn move_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn goto_bottom(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    pub fn half_page_down(&mut self, visible_lines: usize) {
        self.move_down((visible_lines / 2).max(1));
    }

    pub fn half_page_up(&mut self, visible_lines: usize) {
        self.move_up((visible_lines / 2).max(1));
    }

    /// Select the row showing `id`, if any.
    pub fn select(&mut self, id: NodeId) -> bool {
        match self.rows.iter().position(|r| r.id == id) {
            Some(pos) => {
                self.selected = pos;
                true
            }
            None => false,
        }
    }

    /// Toggle the selected node open/closed.
    pub fn toggle_selected(&mut self, tree: &mut Tree) -> bool {
        let Some(row) = self.selected_row() else {
            return false;
        };
        if !row.has_children {
            return false;
        }
        let (id, expanded) = (row.id, row.is_expanded);
        tree.set_expanded(id, !expanded);
        self.rebuild(tree);
        true
    }

    /// Expand the selected node (no-op if already open or a leaf).
    pub fn expand_selected(&mut self, tree: &mut Tree) -> bool {
        let Some(id) = self
            .selected_row()
            .filter(|row| row.has_children && !row.is_expanded)
            .map(|row| row.id)
        else {
            return false;
        };
        tree.set_expanded(id, true);
        self.rebuild(tree);
        true
    }

    /// Collapse the selected node, or move to its parent if it is already
    /// closed or a leaf.
    pub fn collapse_or_parent(&mut self, tree: &mut Tree) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let (id, is_open) = (row.id, row.has_children && row.is_expanded);

        if is_open {
            tree.set_expanded(id, false);
            self.rebuild(tree);
            return;
        }

        if let Some(parent) = tree.parent(id) {
            self.select(parent);
        }
    }

    /// Open or close every attached node.
    pub fn set_all_expanded(&mut self, tree: &mut Tree, expanded: bool) {
        let ids: Vec<NodeId> = tree.iter_preorder().collect();
        for id in ids {
            tree.set_expanded(id, expanded);
        }
        self.rebuild(tree);
    }
}

/// Flatten attached nodes into rows, descending only into expanded nodes.
fn flatten(tree: &Tree, nodes: &[NodeId], depth: usize, parent_guides: &[bool], out: &mut Vec<Row>) {
    for (i, &id) in nodes.iter().enumerate() {
        let children = tree.children(id);
        let expanded = tree.is_expanded(id);

        out.push(Row {
            id,
            depth,
            label: display_label(tree.label(id)).to_string(),
            is_expanded: expanded,
            has_children: !children.is_empty(),
            guide_depths: parent_guides.to_vec(),
        });

        if expanded && !children.is_empty() {
            let mut child_guides = parent_guides.to_vec();
            child_guides.push(i + 1 < nodes.len());
            flatten(tree, children, depth + 1, &child_guides, out);
        }
    }
}

// ── Rendering ────────────────────────────────────────────────────────

const GUIDE_STYLE: Style = Style::new().fg(Color::DarkGray);
const SELECTED_BG: Color = Color::Gray;
const LEAF_ICON: &str = "\u{25CF} ";

/// Configuration for rendering the outline.
pub struct OutlineRenderConfig<'a> {
    /// Title in the outline border (the input source).
    pub title: &'a str,
    /// Whether the outline has keyboard focus (vs the search field).
    pub focused: bool,
    /// Shown when there are no rows.
    pub empty_message: &'a str,
}

/// Render the outline into the given area.
pub fn render_outline(frame: &mut Frame, area: Rect, view: &OutlineView, config: &OutlineRenderConfig<'_>) {
    let block = tool_block(config.title, config.focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if view.rows.is_empty() {
        let empty = Paragraph::new(format!("  {}", config.empty_message))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let visible_lines = inner.height as usize;
    let scroll_offset = scroll_offset(view.selected, visible_lines);

    let lines: Vec<Line> = view
        .rows
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_lines)
        .map(|(idx, row)| render_row(row, idx == view.selected, inner.width))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// First row to draw so the selection stays on screen.
fn scroll_offset(selected: usize, visible_lines: usize) -> usize {
    if selected >= visible_lines {
        selected - visible_lines + 1
    } else {
        0
    }
}

fn render_row(row: &Row, is_selected: bool, area_width: u16) -> Line<'static> {
    let base_style = if is_selected {
        Style::default()
            .bg(SELECTED_BG)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else if row.has_children {
        Style::default().fg(Color::Blue)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans: Vec<Span<'static>> = Vec::new();

    for d in 0..row.depth {
        if row.guide_depths.get(d).copied().unwrap_or(false) {
            let guide_style = if is_selected {
                GUIDE_STYLE.bg(SELECTED_BG)
            } else {
                GUIDE_STYLE
            };
            spans.push(Span::styled("\u{2502} ", guide_style));
        } else {
            spans.push(Span::styled("  ", base_style));
        }
    }

    let icon = match (row.has_children, row.is_expanded) {
        (true, true) => "\u{25BC} ",
        (true, false) => "\u{25B6} ",
        (false, _) => LEAF_ICON,
    };
    spans.push(Span::styled(icon, base_style));
    spans.push(Span::styled(row.label.clone(), base_style));

    if is_selected {
        let content_width: usize = spans.iter().map(|s| s.content.width()).sum();
        let remaining = (area_width as usize).saturating_sub(content_width);
        if remaining > 0 {
            spans.push(Span::styled(" ".repeat(remaining), Style::default().bg(SELECTED_BG)));
        }
    }

    Line::from(spans)
}

// ── Tests ────────────────────────────────────────────────────────────
