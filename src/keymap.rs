//! Data-driven keybinding configuration
//!
//! Bindings live in `KeyMap::default()` as data rather than as match arms in
//! the components. Keys that resolve to nothing fall through to the focused
//! component (for the editor, its mode tables).

use crate::app::PanelFocus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// A key combination (code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

impl From<KeyEvent> for KeyBind {
    fn from(event: KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }
}

/// Semantic key actions: what a key means, not what key it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Global
    Quit,
    CycleFocus,
    CycleFocusReverse,

    // Navigation (tree, results)
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Editor
    ExecuteQuery,

    // Tree
    Select,
}

type Bindings = HashMap<KeyBind, KeyAction>;

/// Keybinding configuration: maps key combos to semantic actions per context.
pub struct KeyMap {
    /// Bindings that apply regardless of focus (checked first)
    global: Bindings,
    /// Per-panel bindings (checked after global)
    panels: HashMap<PanelFocus, Bindings>,
}

impl KeyMap {
    /// Resolve a key event to a semantic action.
    /// Checks global bindings first, then panel-specific bindings.
    pub fn resolve(&self, focus: PanelFocus, key: KeyEvent) -> Option<KeyAction> {
        let bind = KeyBind::from(key);
        if let Some(action) = self.global.get(&bind) {
            return Some(*action);
        }
        self.panels
            .get(&focus)
            .and_then(|m| m.get(&bind))
            .copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let global = Bindings::from([
            (KeyBind::ctrl('q'), KeyAction::Quit),
            (KeyBind::plain(KeyCode::Tab), KeyAction::CycleFocus),
            (
                KeyBind::new(KeyCode::BackTab, KeyModifiers::SHIFT),
                KeyAction::CycleFocusReverse,
            ),
        ]);

        // ── Editor ───────────────────────────────────────────────
        // Only chords the mode tables never claim, so execution works in
        // both modes.
        let editor = Bindings::from([
            (KeyBind::ctrl('e'), KeyAction::ExecuteQuery),
            (KeyBind::plain(KeyCode::F(5)), KeyAction::ExecuteQuery),
        ]);

        // ── Tree ─────────────────────────────────────────────────
        let mut tree = Bindings::new();
        insert_scroll_nav(&mut tree);
        tree.insert(KeyBind::plain(KeyCode::Enter), KeyAction::Select);
        tree.insert(KeyBind::plain(KeyCode::Char(' ')), KeyAction::Select);

        // ── Results ──────────────────────────────────────────────
        let mut results = Bindings::new();
        insert_scroll_nav(&mut results);
        results.extend([
            (KeyBind::plain(KeyCode::Left), KeyAction::MoveLeft),
            (KeyBind::plain(KeyCode::Char('h')), KeyAction::MoveLeft),
            (KeyBind::plain(KeyCode::Right), KeyAction::MoveRight),
            (KeyBind::plain(KeyCode::Char('l')), KeyAction::MoveRight),
        ]);

        let panels = HashMap::from([
            (PanelFocus::QueryEditor, editor),
            (PanelFocus::TreeBrowser, tree),
            (PanelFocus::ResultsViewer, results),
        ]);

        Self { global, panels }
    }
}

/// Insert vertical navigation bindings (arrows + jk + page + g/G)
fn insert_scroll_nav(map: &mut Bindings) {
    map.extend([
        (KeyBind::plain(KeyCode::Down), KeyAction::MoveDown),
        (KeyBind::plain(KeyCode::Char('j')), KeyAction::MoveDown),
        (KeyBind::plain(KeyCode::Up), KeyAction::MoveUp),
        (KeyBind::plain(KeyCode::Char('k')), KeyAction::MoveUp),
        (KeyBind::plain(KeyCode::PageDown), KeyAction::PageDown),
        (KeyBind::plain(KeyCode::PageUp), KeyAction::PageUp),
        (KeyBind::plain(KeyCode::Char('g')), KeyAction::GoToTop),
        (
            KeyBind::new(KeyCode::Char('G'), KeyModifiers::SHIFT),
            KeyAction::GoToBottom,
        ),
        (KeyBind::plain(KeyCode::Home), KeyAction::GoToTop),
        (KeyBind::plain(KeyCode::End), KeyAction::GoToBottom),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_quit() {
        let km = KeyMap::default();
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(km.resolve(PanelFocus::QueryEditor, key), Some(KeyAction::Quit));
        assert_eq!(km.resolve(PanelFocus::TreeBrowser, key), Some(KeyAction::Quit));
    }

    #[test]
    fn test_global_overrides_panel() {
        let km = KeyMap::default();
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(
            km.resolve(PanelFocus::ResultsViewer, key),
            Some(KeyAction::CycleFocus)
        );
    }

    #[test]
    fn test_execute_bindings_in_editor() {
        let km = KeyMap::default();
        let ctrl_e = KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL);
        let f5 = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(
            km.resolve(PanelFocus::QueryEditor, ctrl_e),
            Some(KeyAction::ExecuteQuery)
        );
        assert_eq!(
            km.resolve(PanelFocus::QueryEditor, f5),
            Some(KeyAction::ExecuteQuery)
        );
        assert_eq!(km.resolve(PanelFocus::TreeBrowser, ctrl_e), None);
    }

    #[test]
    fn test_editor_keys_fall_through() {
        let km = KeyMap::default();
        for code in [
            KeyCode::Char('i'),
            KeyCode::Char('j'),
            KeyCode::Char('w'),
            KeyCode::Esc,
            KeyCode::Enter,
            KeyCode::Backspace,
        ] {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(km.resolve(PanelFocus::QueryEditor, key), None);
        }
    }

    #[test]
    fn test_tree_select_bindings() {
        let km = KeyMap::default();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(km.resolve(PanelFocus::TreeBrowser, enter), Some(KeyAction::Select));
        assert_eq!(km.resolve(PanelFocus::TreeBrowser, space), Some(KeyAction::Select));
        assert_eq!(km.resolve(PanelFocus::ResultsViewer, enter), None);
    }

    #[test]
    fn test_vim_navigation_in_results() {
        let km = KeyMap::default();
        let j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        let l = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(km.resolve(PanelFocus::ResultsViewer, j), Some(KeyAction::MoveDown));
        assert_eq!(km.resolve(PanelFocus::ResultsViewer, l), Some(KeyAction::MoveRight));
        assert_eq!(km.resolve(PanelFocus::TreeBrowser, l), None);
    }
}
