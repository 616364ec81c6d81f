//! Editing modes and their key tables.
//!
//! Each mode owns a table from key events to [`EditOp`]s. The editor never
//! branches on the mode itself; it asks the mode what a key means and
//! whether an operation is legal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The current editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation and commands.
    #[default]
    Normal,
    /// Text entry.
    Insert,
}

/// A single editing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Normal -> Insert.
    EnterInsert,
    /// Insert -> Normal.
    ExitInsert,
    Move(Motion),
    /// Splice text at the cursor.
    InsertText(String),
    /// Delete the previous character or join with the previous line.
    Backspace,
    /// Break the line at the cursor.
    SplitLine,
}

/// Cursor motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Up,
    Down,
    Left,
    Right,
    WordForward,
    WordBackward,
}

impl Mode {
    /// Returns true if in insert mode.
    pub fn is_insert(&self) -> bool {
        matches!(self, Mode::Insert)
    }

    /// Returns the mode name for display.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
        }
    }

    /// Look up the operation bound to `key` in this mode.
    pub fn resolve(self, key: KeyEvent) -> Option<EditOp> {
        match self {
            Mode::Normal => normal_op(key),
            Mode::Insert => insert_op(key),
        }
    }

    /// Whether `op` may run in this mode.
    pub fn permits(self, op: &EditOp) -> bool {
        match op {
            EditOp::EnterInsert => self == Mode::Normal,
            EditOp::ExitInsert => self == Mode::Insert,
            EditOp::Move(Motion::WordForward | Motion::WordBackward) => self == Mode::Normal,
            EditOp::Move(_) => true,
            EditOp::InsertText(_) | EditOp::Backspace | EditOp::SplitLine => {
                self == Mode::Insert
            }
        }
    }
}

/// Arrow keys move in both modes.
fn arrow_motion(code: KeyCode) -> Option<Motion> {
    match code {
        KeyCode::Up => Some(Motion::Up),
        KeyCode::Down => Some(Motion::Down),
        KeyCode::Left => Some(Motion::Left),
        KeyCode::Right => Some(Motion::Right),
        _ => None,
    }
}

fn has_command_modifier(key: &KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn normal_op(key: KeyEvent) -> Option<EditOp> {
    if has_command_modifier(&key) {
        return None;
    }
    if let Some(motion) = arrow_motion(key.code) {
        return Some(EditOp::Move(motion));
    }
    let op = match key.code {
        KeyCode::Char('i') => EditOp::EnterInsert,
        KeyCode::Char('w') => EditOp::Move(Motion::WordForward),
        KeyCode::Char('b') => EditOp::Move(Motion::WordBackward),
        KeyCode::Char('h') => EditOp::Move(Motion::Left),
        KeyCode::Char('j') => EditOp::Move(Motion::Down),
        KeyCode::Char('k') => EditOp::Move(Motion::Up),
        KeyCode::Char('l') => EditOp::Move(Motion::Right),
        _ => return None,
    };
    Some(op)
}

fn insert_op(key: KeyEvent) -> Option<EditOp> {
    if has_command_modifier(&key) {
        return None;
    }
    if let Some(motion) = arrow_motion(key.code) {
        return Some(EditOp::Move(motion));
    }
    let op = match key.code {
        KeyCode::Esc => EditOp::ExitInsert,
        KeyCode::Enter => EditOp::SplitLine,
        KeyCode::Backspace => EditOp::Backspace,
        KeyCode::Char(c) => EditOp::InsertText(c.to_string()),
        _ => return None,
    };
    Some(op)
}
