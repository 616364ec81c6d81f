//! UI theme and styling
//!
//! Defines colors, styles, and visual appearance for all UI components.

use crate::ui::highlight::TokenKind;
use ratatui::style::{Color, Modifier, Style};

/// Application theme
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    pub border_focused: Style,
    pub border_unfocused: Style,

    // Tree browser
    pub tree_root: Style,
    pub tree_table: Style,
    pub tree_leaf: Style,
    pub tree_selected: Style,

    // Query editor
    pub editor_text: Style,
    pub editor_keyword: Style,
    pub editor_number: Style,
    pub editor_symbol: Style,
    pub editor_string: Style,
    pub editor_comment: Style,
    pub editor_cursor_normal: Style,
    pub editor_cursor_insert: Style,
    pub mode_normal: Style,
    pub mode_insert: Style,

    // Results table
    pub results_header: Style,
    pub results_row_even: Style,
    pub results_row_odd: Style,
    pub results_selected: Style,
    pub results_null: Style,
    pub results_footer: Style,
    pub results_empty: Style,
    pub results_error_title: Style,
    pub results_error_text: Style,

    // Status messages
    pub status_success: Style,
    pub status_error: Style,
    pub status_info: Style,
    pub status_warning: Style,
    pub status_hint: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Borders
            border_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border_unfocused: Style::default().fg(Color::DarkGray),

            // Tree browser
            tree_root: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tree_table: Style::default().fg(Color::Green),
            tree_leaf: Style::default().fg(Color::Gray),
            tree_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            // Query editor
            editor_text: Style::default().fg(Color::White),
            editor_keyword: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            editor_number: Style::default().fg(Color::Magenta),
            editor_symbol: Style::default().fg(Color::Yellow),
            editor_string: Style::default().fg(Color::Green),
            editor_comment: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            editor_cursor_normal: Style::default().bg(Color::White).fg(Color::Black),
            editor_cursor_insert: Style::default().add_modifier(Modifier::UNDERLINED | Modifier::REVERSED),
            mode_normal: Style::default()
                .fg(Color::Black)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            mode_insert: Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),

            // Results table
            results_header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            results_row_even: Style::default().fg(Color::White),
            results_row_odd: Style::default().fg(Color::Gray),
            results_selected: Style::default().fg(Color::Black).bg(Color::Yellow),
            results_null: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            results_footer: Style::default().fg(Color::DarkGray),
            results_empty: Style::default().fg(Color::DarkGray),
            results_error_title: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            results_error_text: Style::default().fg(Color::Red),

            // Status messages
            status_success: Style::default().fg(Color::Green),
            status_error: Style::default().fg(Color::Red),
            status_info: Style::default().fg(Color::Blue),
            status_warning: Style::default().fg(Color::Yellow),
            status_hint: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Create a new theme with default colors
    pub fn new() -> Self {
        Self::default()
    }

    /// Get border style based on focus
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }

    /// Style for a highlighted token
    pub fn token_style(&self, kind: TokenKind) -> Style {
        match kind {
            TokenKind::Keyword => self.editor_keyword,
            TokenKind::Identifier => self.editor_text,
            TokenKind::Number => self.editor_number,
            TokenKind::Symbol => self.editor_symbol,
            TokenKind::String => self.editor_string,
            TokenKind::Comment => self.editor_comment,
        }
    }
}
