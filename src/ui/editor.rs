//! Query editor widget
//!
//! Wraps the modal line editor: routes keys into it, keeps the cursor row
//! scrolled into view, and draws the buffer with syntax highlighting.

use crate::editor::{ModalEditor, Mode, char_len};
use crate::ui::highlight::classify;
use crate::ui::theme::Theme;
use crate::ui::{Component, ComponentAction};
use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Query editor component
pub struct QueryEditor {
    editor: ModalEditor,
    /// Inner size of the pane from the last resize
    width: u16,
    height: u16,
    /// First visible line
    scroll_offset: usize,
    highlighting: bool,
}

impl QueryEditor {
    pub fn new() -> Self {
        Self {
            editor: ModalEditor::new(),
            width: 0,
            height: 0,
            scroll_offset: 0,
            highlighting: true,
        }
    }

    pub fn with_highlighting(mut self, enabled: bool) -> Self {
        self.highlighting = enabled;
        self
    }

    /// The underlying editing engine
    pub fn editor(&self) -> &ModalEditor {
        &self.editor
    }

    pub fn mode(&self) -> Mode {
        self.editor.mode()
    }

    /// The whole buffer, lines joined with `\n`
    pub fn content(&self) -> String {
        self.editor.content()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Replace the buffer with a query from the tree.
    pub fn load_query(&mut self, query: &str) {
        self.editor.load_query(query);
        self.ensure_cursor_visible();
    }

    /// Bracketed paste. Returns false (and changes nothing) outside Insert mode.
    pub fn paste(&mut self, text: &str) -> bool {
        let pasted = self.editor.paste(text);
        self.ensure_cursor_visible();
        pasted
    }

    /// Record the pane's new inner size. The buffer is untouched.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.ensure_cursor_visible();
    }

    /// Ask for the buffer to be executed. Works in either mode and never
    /// changes the buffer.
    pub fn execute_request(&self) -> ComponentAction {
        ComponentAction::ExecuteQuery(self.editor.content())
    }

    fn ensure_cursor_visible(&mut self) {
        let height = self.height as usize;
        if height == 0 {
            return;
        }
        let row = self.editor.cursor().row;
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + height {
            self.scroll_offset = row + 1 - height;
        }
    }

    /// Styled segments of one line, before cursor splitting.
    fn segments<'a>(&self, line: &'a str, theme: &Theme) -> Vec<(Style, &'a str)> {
        if self.highlighting {
            classify(line)
                .into_iter()
                .map(|t| (theme.token_style(t.kind), t.value))
                .collect()
        } else {
            vec![(theme.editor_text, line)]
        }
    }

    fn render_line<'a>(
        &self,
        line: &'a str,
        cursor_col: Option<usize>,
        theme: &Theme,
    ) -> Line<'a> {
        let segments = self.segments(line, theme);
        let Some(col) = cursor_col else {
            return Line::from(
                segments
                    .into_iter()
                    .map(|(style, text)| Span::styled(text, style))
                    .collect::<Vec<_>>(),
            );
        };

        let cursor_style = match self.editor.mode() {
            Mode::Normal => theme.editor_cursor_normal,
            Mode::Insert => theme.editor_cursor_insert,
        };

        let mut spans = Vec::with_capacity(segments.len() + 2);
        let mut start = 0;
        for (style, text) in segments {
            let len = char_len(text);
            if (start..start + len).contains(&col) {
                let (before, rest) = split_at_char(text, col - start);
                let (at, after) = split_at_char(rest, 1);
                if !before.is_empty() {
                    spans.push(Span::styled(before, style));
                }
                spans.push(Span::styled(at, cursor_style));
                if !after.is_empty() {
                    spans.push(Span::styled(after, style));
                }
            } else {
                spans.push(Span::styled(text, style));
            }
            start += len;
        }
        if col >= start {
            spans.push(Span::styled(" ", cursor_style));
        }
        Line::from(spans)
    }
}

impl Default for QueryEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for QueryEditor {
    fn handle_key(&mut self, key: KeyEvent) -> ComponentAction {
        if self.editor.handle_key(key) {
            self.ensure_cursor_visible();
            ComponentAction::Consumed
        } else {
            ComponentAction::Ignored
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let height = area.height as usize;
        if height == 0 {
            return;
        }
        let cursor = self.editor.cursor();
        // the stored offset may lag a resize that has not been delivered yet
        let scroll = if cursor.row >= self.scroll_offset + height {
            cursor.row + 1 - height
        } else {
            self.scroll_offset.min(cursor.row)
        };

        let lines: Vec<Line> = self
            .editor
            .lines()
            .iter()
            .enumerate()
            .skip(scroll)
            .take(height)
            .map(|(row, line)| {
                let cursor_col = (focused && row == cursor.row).then_some(cursor.col);
                self.render_line(line, cursor_col, theme)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Split `s` after `n` characters.
fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    let idx = s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    s.split_at(idx)
}
