//! Terminal UI components
//!
//! All UI widgets and rendering logic using ratatui.

pub mod editor;
pub mod highlight;
pub mod layout;
pub mod render;
pub mod results;
pub mod theme;
pub mod tree;

use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::ui::theme::Theme;

/// Actions a component can return to signal intent to the parent.
/// Components never mutate siblings; they declare what should happen,
/// and `App::process_component_action` decides how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentAction {
    /// Event consumed, no further action needed
    Consumed,
    /// Event not handled, parent should try
    Ignored,
    /// Replace the editor buffer with this query
    LoadQuery(String),
    /// Hand this SQL to the database
    ExecuteQuery(String),
    /// Show a status notification
    Notify(Notification),
}

/// Status text, optionally carrying the error that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub error: Option<String>,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>, error: impl ToString) -> Self {
        Self {
            message: message.into(),
            error: Some(error.to_string()),
        }
    }

    /// Message and error joined for a single status line.
    pub fn text(&self) -> String {
        match &self.error {
            Some(err) => format!("{}: {}", self.message, err),
            None => self.message.clone(),
        }
    }
}

/// Trait for UI components
pub trait Component {
    /// Handle a key event, returning an action for the parent to process.
    ///
    /// Most panels are driven entirely by the keymap and ignore raw keys.
    fn handle_key(&mut self, _key: KeyEvent) -> ComponentAction {
        ComponentAction::Ignored
    }

    /// Render the component to the frame
    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme);
}
