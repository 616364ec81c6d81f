//! Database tree browser widget
//!
//! Shows the flattened schema tree with a selection cursor. Selecting a
//! node either loads its query into the editor or opens/closes it.

use crate::db::schema::{SchemaTree, Selection};
use crate::ui::theme::Theme;
use crate::ui::{Component, ComponentAction};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Tree browser component
pub struct TreeBrowser {
    tree: SchemaTree,
    /// Index into the flat list
    selected: usize,
}

impl TreeBrowser {
    pub fn new(tree: SchemaTree) -> Self {
        Self { tree, selected: 0 }
    }

    pub fn tree(&self) -> &SchemaTree {
        &self.tree
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.tree.flat().len() {
            self.selected += 1;
        }
    }

    pub fn go_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.selected = self.tree.flat().len().saturating_sub(1);
    }

    /// Select the node under the cursor.
    ///
    /// A node with a query becomes a load-query action; anything else is
    /// toggled in place and needs no further handling.
    pub fn select_current(&mut self) -> ComponentAction {
        let action = match self.tree.select(self.selected) {
            Some(Selection::LoadQuery(query)) => ComponentAction::LoadQuery(query),
            Some(Selection::Toggled) => ComponentAction::Consumed,
            None => ComponentAction::Ignored,
        };
        // the toggled node keeps its index; everything above it is unchanged
        debug_assert!(self.selected < self.tree.flat().len());
        action
    }
}

impl Component for TreeBrowser {
    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let height = area.height as usize;
        if height == 0 {
            return;
        }
        let scroll = (self.selected + 1).saturating_sub(height);

        let lines: Vec<Line> = self
            .tree
            .flat()
            .iter()
            .enumerate()
            .skip(scroll)
            .take(height)
            .map(|(i, entry)| {
                let marker = if entry.is_leaf {
                    "  "
                } else if entry.is_open {
                    "▼ "
                } else {
                    "▶ "
                };
                let text = format!("{}{}{}", "  ".repeat(entry.level), marker, entry.title);
                let style = if focused && i == self.selected {
                    theme.tree_selected
                } else {
                    match entry.level {
                        0 => theme.tree_root,
                        1 => theme.tree_table,
                        _ => theme.tree_leaf,
                    }
                };
                Line::from(Span::styled(text, style))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browser() -> TreeBrowser {
        TreeBrowser::new(SchemaTree::from_tables("sample", &["users", "orders"]))
    }

    #[test]
    fn test_move_up_at_top() {
        let mut tree = browser();
        tree.move_up();
        assert_eq!(tree.selected(), 0);
    }

    #[test]
    fn test_move_down_clamps_to_visible_entries() {
        let mut tree = browser();
        tree.move_down();
        assert_eq!(tree.selected(), 0); // only the root is visible
        tree.select_current();
        tree.move_down();
        tree.move_down();
        tree.move_down();
        assert_eq!(tree.selected(), 2);
    }

    #[test]
    fn test_select_toggles_then_loads() {
        let mut tree = browser();
        assert_eq!(tree.select_current(), ComponentAction::Consumed);
        tree.move_down(); // users
        assert_eq!(tree.select_current(), ComponentAction::Consumed);
        tree.move_down(); // list
        assert_eq!(
            tree.select_current(),
            ComponentAction::LoadQuery("SELECT * FROM \"users\";".to_string())
        );
        assert_eq!(tree.tree().flat().len(), 6);
    }

    #[test]
    fn test_closing_root_clamps_selection() {
        let mut tree = browser();
        tree.select_current();
        tree.go_to_bottom();
        assert_eq!(tree.selected(), 2);
        tree.go_to_top();
        tree.select_current();
        assert_eq!(tree.tree().flat().len(), 1);
        assert_eq!(tree.selected(), 0);
    }
}
