//! Panel layout management
//!
//! Schema tree on the left, editor above results on the right, status line
//! along the bottom.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas for each panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub tree: Rect,
    pub editor: Rect,
    pub results: Rect,
    pub status: Rect,
}

/// Split the terminal area. `tree_width` is clamped so the right-hand side
/// keeps at least half the screen.
pub fn calculate_layout(area: Rect, tree_width: u16) -> PanelLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let tree_width = tree_width.min(rows[0].width / 2);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(tree_width), Constraint::Min(10)])
        .split(rows[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(columns[1]);

    PanelLayout {
        tree: columns[0],
        editor: right[0],
        results: right[1],
        status: rows[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = calculate_layout(area, 30);

        assert_eq!(layout.tree.width, 30);
        assert_eq!(layout.editor.x, 30);
        assert_eq!(layout.editor.width, 70);
        assert_eq!(layout.results.width, 70);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.status.y, 49);
        assert_eq!(layout.editor.height + layout.results.height, 49);
    }

    #[test]
    fn test_tree_width_is_capped() {
        let layout = calculate_layout(Rect::new(0, 0, 40, 20), 30);
        assert_eq!(layout.tree.width, 20);
    }
}
