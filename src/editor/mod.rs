//! Modal line editor
//!
//! A terminal-free editing engine: a non-empty list of lines, a cursor, and
//! a two-state mode machine. The pane in `ui::editor` feeds it key events
//! and renders its state; nothing here knows about the screen.
//!
//! Cursor columns count characters, not bytes.

pub mod mode;
pub mod word;

pub use mode::{EditOp, Mode, Motion};

use crossterm::event::KeyEvent;
use tracing::debug;

/// Cursor position (row, column)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Line buffer + cursor + mode
#[derive(Debug, Clone)]
pub struct ModalEditor {
    lines: Vec<String>,
    cursor: Cursor,
    mode: Mode,
}

impl ModalEditor {
    /// One empty line, cursor at the origin, Normal mode.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Cursor::default(),
            mode: Mode::Normal,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whole buffer joined with `\n`. This is what gets executed.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Resolve `key` through the current mode's table and apply it.
    ///
    /// Returns false when the key has no meaning in this mode.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode.resolve(key) {
            Some(op) => self.apply(op),
            None => false,
        }
    }

    /// Apply an operation if the current mode permits it.
    pub fn apply(&mut self, op: EditOp) -> bool {
        if !self.mode.permits(&op) {
            return false;
        }
        match op {
            EditOp::EnterInsert => self.set_mode(Mode::Insert),
            EditOp::ExitInsert => self.set_mode(Mode::Normal),
            EditOp::Move(motion) => self.move_cursor(motion),
            EditOp::InsertText(text) => self.insert_text(&text),
            EditOp::Backspace => self.backspace(),
            EditOp::SplitLine => self.split_line(),
        }
        self.check_invariants();
        true
    }

    /// Paste text at the cursor. Only honored in Insert mode; `\n` breaks lines.
    pub fn paste(&mut self, text: &str) -> bool {
        if !self.mode.is_insert() {
            return false;
        }
        let text = text.replace("\r\n", "\n");
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                self.split_line();
            }
            self.insert_text(segment);
        }
        self.check_invariants();
        true
    }

    /// Replace the whole buffer with `query`, one line per `\n`.
    ///
    /// Mode is untouched; the cursor only moves if it would fall outside
    /// the new buffer.
    pub fn load_query(&mut self, query: &str) {
        self.lines = query
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        let row = self.cursor.row.min(self.lines.len() - 1);
        let col = self.cursor.col.min(char_len(&self.lines[row]));
        self.cursor = Cursor::new(row, col);
        debug!(lines = self.lines.len(), "query loaded into editor");
        self.check_invariants();
    }

    fn set_mode(&mut self, mode: Mode) {
        debug!(from = self.mode.label(), to = mode.label(), "editor mode change");
        self.mode = mode;
    }

    fn current_len(&self) -> usize {
        char_len(&self.lines[self.cursor.row])
    }

    fn move_cursor(&mut self, motion: Motion) {
        let Cursor { row, col } = self.cursor;
        let last_row = self.lines.len() - 1;
        self.cursor = match motion {
            Motion::Up if row > 0 => Cursor::new(row - 1, col.min(char_len(&self.lines[row - 1]))),
            Motion::Down if row < last_row => {
                Cursor::new(row + 1, col.min(char_len(&self.lines[row + 1])))
            }
            Motion::Left if col > 0 => Cursor::new(row, col - 1),
            Motion::Left if row > 0 => Cursor::new(row - 1, char_len(&self.lines[row - 1])),
            Motion::Right if col < self.current_len() => Cursor::new(row, col + 1),
            Motion::Right if row < last_row => Cursor::new(row + 1, 0),
            Motion::WordForward => Cursor::new(row, word::forward(&self.lines[row], col)),
            Motion::WordBackward => Cursor::new(row, word::backward(&self.lines[row], col)),
            _ => self.cursor,
        };
    }

    fn insert_text(&mut self, text: &str) {
        let Cursor { row, col } = self.cursor;
        let line = &mut self.lines[row];
        let at = byte_offset(line, col);
        line.insert_str(at, text);
        self.cursor.col = col + char_len(text);
    }

    fn backspace(&mut self) {
        let Cursor { row, col } = self.cursor;
        if col > 0 {
            let line = &mut self.lines[row];
            let start = byte_offset(line, col - 1);
            let end = byte_offset(line, col);
            line.replace_range(start..end, "");
            self.cursor.col = col - 1;
        } else if row > 0 {
            let current = self.lines.remove(row);
            let prev = &mut self.lines[row - 1];
            let prev_len = char_len(prev);
            prev.push_str(&current);
            self.cursor = Cursor::new(row - 1, prev_len);
        }
    }

    fn split_line(&mut self) {
        let Cursor { row, col } = self.cursor;
        let line = &mut self.lines[row];
        let at = byte_offset(line, col);
        let tail = line.split_off(at);
        self.lines.insert(row + 1, tail);
        self.cursor = Cursor::new(row + 1, 0);
    }

    fn check_invariants(&self) {
        debug_assert!(!self.lines.is_empty(), "buffer must hold at least one line");
        debug_assert!(
            self.cursor.row < self.lines.len(),
            "cursor row {} outside buffer of {} lines",
            self.cursor.row,
            self.lines.len()
        );
        debug_assert!(
            self.cursor.col <= self.current_len(),
            "cursor col {} past end of line {}",
            self.cursor.col,
            self.cursor.row
        );
    }
}

impl Default for ModalEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Length of `s` in characters.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of character column `col` (end of string when past it).
fn byte_offset(s: &str, col: usize) -> usize {
    s.char_indices().nth(col).map_or(s.len(), |(i, _)| i)
}
