//! Query results viewer widget
//!
//! Displays the last result in a scrollable table with cell-level selection,
//! or the last execution error.

use crate::db::types::QueryResults;
use crate::ui::Component;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

const PAGE: usize = 20;

/// Results table viewer
pub struct ResultsViewer {
    results: Option<QueryResults>,
    selected_row: usize,
    selected_col: usize,
    /// Computed column widths
    col_widths: Vec<u16>,
    /// Last query error (shown in results area)
    error: Option<String>,
}

impl ResultsViewer {
    pub fn new() -> Self {
        Self {
            results: None,
            selected_row: 0,
            selected_col: 0,
            col_widths: Vec::new(),
            error: None,
        }
    }

    pub fn set_results(&mut self, results: QueryResults) {
        self.col_widths = compute_column_widths(&results);
        self.results = Some(results);
        self.error = None;
        self.selected_row = 0;
        self.selected_col = 0;
    }

    /// Set an error to display in the results area
    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
        self.results = None;
        self.col_widths.clear();
    }

    pub fn results(&self) -> Option<&QueryResults> {
        self.results.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn move_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_row + 1 < self.row_count() {
            self.selected_row += 1;
        }
    }

    pub fn move_left(&mut self) {
        self.selected_col = self.selected_col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.selected_col + 1 < self.col_count() {
            self.selected_col += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(PAGE);
    }

    pub fn page_down(&mut self) {
        self.selected_row = (self.selected_row + PAGE).min(self.row_count().saturating_sub(1));
    }

    pub fn go_to_top(&mut self) {
        self.selected_row = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.selected_row = self.row_count().saturating_sub(1);
    }

    fn row_count(&self) -> usize {
        self.results.as_ref().map_or(0, |r| r.rows.len())
    }

    fn col_count(&self) -> usize {
        self.results.as_ref().map_or(0, |r| r.columns.len())
    }

    /// First column to draw so the selected one fits in `width`.
    fn first_visible_col(&self, width: u16) -> usize {
        let mut first = self.selected_col;
        let mut used = self.col_widths.get(first).copied().unwrap_or(10);
        while first > 0 {
            let prev = self.col_widths.get(first - 1).copied().unwrap_or(10);
            if used + prev + 1 > width {
                break;
            }
            used += prev + 1;
            first -= 1;
        }
        first
    }
}

impl Default for ResultsViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ResultsViewer {
    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        if let Some(ref error) = self.error {
            let lines = vec![
                Line::from(Span::styled("Query Error", theme.results_error_title)),
                Line::from(""),
                Line::from(Span::styled(error.as_str(), theme.results_error_text)),
            ];
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
            return;
        }

        let results = match &self.results {
            Some(r) if !r.columns.is_empty() => r,
            _ => {
                let msg = if self.results.is_some() {
                    "Statement returned no columns"
                } else {
                    "No results yet. Write a query and press Ctrl+E to execute."
                };
                frame.render_widget(Paragraph::new(msg).style(theme.results_empty), area);
                return;
            }
        };

        if area.height < 2 || area.width < 5 {
            return;
        }

        let visible_height = (area.height as usize).saturating_sub(2); // header + footer
        let scroll = (self.selected_row + 1).saturating_sub(visible_height);
        let first_col = self.first_visible_col(area.width);
        let right = area.x + area.width;

        // Header
        let mut x = area.x;
        for (col_idx, col_def) in results.columns.iter().enumerate().skip(first_col) {
            if x >= right {
                break;
            }
            let w = self.col_widths[col_idx].min(right - x);
            let name = fit(&col_def.name, w as usize, false);
            frame.render_widget(
                Paragraph::new(name).style(theme.results_header),
                Rect::new(x, area.y, w, 1),
            );
            x += w + 1;
        }

        // Rows
        for (vis_row, (row_idx, row)) in results
            .rows
            .iter()
            .enumerate()
            .skip(scroll)
            .take(visible_height)
            .enumerate()
        {
            let y = area.y + 1 + vis_row as u16;
            let base = if row_idx % 2 == 0 {
                theme.results_row_even
            } else {
                theme.results_row_odd
            };

            let mut x = area.x;
            for (col_idx, cell) in row.values.iter().enumerate().skip(first_col) {
                if x >= right {
                    break;
                }
                let w = self.col_widths.get(col_idx).copied().unwrap_or(10).min(right - x);
                let style = if focused && row_idx == self.selected_row && col_idx == self.selected_col
                {
                    theme.results_selected
                } else if cell.is_null() {
                    theme.results_null
                } else {
                    base
                };
                let numeric = results
                    .columns
                    .get(col_idx)
                    .is_some_and(|c| c.data_type.is_numeric());
                let text = fit(&cell.display_string(w as usize), w as usize, numeric);
                frame.render_widget(Paragraph::new(text).style(style), Rect::new(x, y, w, 1));
                x += w + 1;
            }
        }

        let footer = format!(
            "Row {}/{} | Col {}/{} | {}",
            (self.selected_row + 1).min(results.row_count()),
            results.row_count(),
            self.selected_col + 1,
            results.columns.len(),
            results.summary(),
        );
        frame.render_widget(
            Paragraph::new(footer).style(theme.results_footer),
            Rect::new(area.x, area.y + area.height - 1, area.width, 1),
        );
    }
}

/// Compute column widths from header names and the first 100 rows
fn compute_column_widths(results: &QueryResults) -> Vec<u16> {
    let mut widths: Vec<usize> = results.columns.iter().map(|c| c.name.width()).collect();

    for row in results.rows.iter().take(100) {
        for (w, cell) in widths.iter_mut().zip(&row.values) {
            *w = (*w).max(cell.display_string(40).width());
        }
    }

    widths.into_iter().map(|w| w.clamp(4, 40) as u16).collect()
}

/// Pad or cut `s` to exactly `width` display columns.
fn fit(s: &str, width: usize, right_align: bool) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    let pad = " ".repeat(width - used);
    if right_align {
        format!("{}{}", pad, out)
    } else {
        format!("{}{}", out, pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::types::{CellValue, ColumnDef, DataType, Row};
    use std::time::Duration;

    fn sample_results() -> QueryResults {
        QueryResults::new(
            vec![
                ColumnDef::new("id", DataType::Integer),
                ColumnDef::new("name", DataType::Text),
            ],
            vec![
                Row {
                    values: vec![CellValue::Integer(1), CellValue::Text("Alice".to_string())],
                },
                Row {
                    values: vec![CellValue::Integer(2), CellValue::Null],
                },
            ],
            Duration::from_millis(42),
        )
    }

    #[test]
    fn test_results_viewer_new() {
        let viewer = ResultsViewer::new();
        assert!(viewer.results().is_none());
        assert!(viewer.error().is_none());
    }

    #[test]
    fn test_set_error_clears_results() {
        let mut viewer = ResultsViewer::new();
        viewer.set_results(sample_results());
        viewer.set_error("relation \"foo\" does not exist".to_string());
        assert!(viewer.results().is_none());
        assert_eq!(viewer.error(), Some("relation \"foo\" does not exist"));
    }

    #[test]
    fn test_set_results_clears_error() {
        let mut viewer = ResultsViewer::new();
        viewer.set_error("some error".to_string());
        viewer.set_results(sample_results());
        assert!(viewer.error().is_none());
        assert_eq!(viewer.row_count(), 2);
        assert_eq!(viewer.col_count(), 2);
    }

    #[test]
    fn test_navigation_on_empty_results() {
        let mut viewer = ResultsViewer::new();
        viewer.move_up();
        viewer.move_down();
        viewer.move_left();
        viewer.move_right();
        viewer.page_up();
        viewer.page_down();
        viewer.go_to_bottom();
        assert_eq!(viewer.selected_row, 0);
        assert_eq!(viewer.selected_col, 0);
    }

    #[test]
    fn test_navigation_boundary_clamping() {
        let mut viewer = ResultsViewer::new();
        viewer.set_results(sample_results());
        viewer.move_down();
        viewer.move_down();
        assert_eq!(viewer.selected_row, 1);
        viewer.move_right();
        viewer.move_right();
        assert_eq!(viewer.selected_col, 1);
        viewer.go_to_top();
        viewer.move_up();
        assert_eq!(viewer.selected_row, 0);
    }

    #[test]
    fn test_column_widths() {
        let widths = compute_column_widths(&sample_results());
        assert_eq!(widths, vec![4, 5]);
    }

    #[test]
    fn test_fit_pads_and_cuts() {
        assert_eq!(fit("ab", 4, false), "ab  ");
        assert_eq!(fit("42", 4, true), "  42");
        assert_eq!(fit("abcdef", 3, false), "abc");
    }

    #[test]
    fn test_first_visible_col_scrolls_right() {
        let mut viewer = ResultsViewer::new();
        viewer.set_results(sample_results());
        viewer.selected_col = 1;
        assert_eq!(viewer.first_visible_col(80), 0);
        assert_eq!(viewer.first_visible_col(6), 1);
    }
}
