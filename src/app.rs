//! Application state and event handling
//!
//! Central state machine: events come in, state updates, actions go out.
//! The panes never talk to each other directly; they return
//! [`ComponentAction`]s and `process_component_action` routes them.

use crate::config::Settings;
use crate::db::QueryResults;
use crate::error::DbResult;
use crate::db::schema::SchemaTree;
use crate::error::Result;
use crate::keymap::{KeyAction, KeyMap};
use crate::ui::editor::QueryEditor;
use crate::ui::layout::calculate_layout;
use crate::ui::results::ResultsViewer;
use crate::ui::theme::Theme;
use crate::ui::tree::TreeBrowser;
use crate::ui::{Component, ComponentAction, Notification};
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Main application state
pub struct App {
    /// Name of the current connection, if any
    pub connection_name: Option<String>,

    /// Which panel currently has focus
    pub focus: PanelFocus,

    pub tree_browser: TreeBrowser,
    pub editor: QueryEditor,
    pub results_viewer: ResultsViewer,

    /// Data-driven keybinding configuration
    pub keymap: KeyMap,

    /// UI theme (created once, reused every frame)
    pub theme: Theme,

    /// Width of the schema pane
    pub tree_width: u16,

    /// Status message to display
    pub status_message: Option<StatusMessage>,

    /// An execution is in flight; further requests are refused until it returns
    pub query_running: bool,

    /// Whether the application is running
    pub running: bool,
}

/// Panel focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelFocus {
    TreeBrowser,
    QueryEditor,
    ResultsViewer,
}

/// Status message with severity level
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub level: StatusLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Application events from the event loop
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event
    Key(KeyEvent),
    /// Bracketed paste
    Paste(String),
    /// Terminal resized to this many columns and rows
    Resize { width: u16, height: u16 },
    /// Query execution completed successfully
    QueryCompleted(QueryResults),
    /// Query execution failed
    QueryFailed(String),
    /// Background database connection lost
    ConnectionLost(String),
}

/// Actions returned by event handlers for the main loop to execute
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Run this SQL and report back with `QueryCompleted`/`QueryFailed`
    ExecuteQuery(String),
    Quit,
    None,
}

impl App {
    pub fn new(tree: SchemaTree, settings: &Settings) -> Self {
        Self {
            connection_name: None,
            focus: PanelFocus::TreeBrowser,
            tree_browser: TreeBrowser::new(tree),
            editor: QueryEditor::new().with_highlighting(settings.syntax_highlighting),
            results_viewer: ResultsViewer::new(),
            keymap: KeyMap::default(),
            theme: Theme::default(),
            tree_width: settings.tree_width,
            status_message: None,
            query_running: false,
            running: true,
        }
    }

    /// Create an app pre-loaded with a connection name and schema
    pub fn with_connection(name: String, tree: SchemaTree, settings: &Settings) -> Self {
        let mut app = Self::new(tree, settings);
        app.connection_name = Some(name);
        app
    }

    /// Handle an application event and return resulting action
    pub fn handle_event(&mut self, event: AppEvent) -> Result<Action> {
        match event {
            AppEvent::Key(key) => Ok(self.handle_key(key)),
            AppEvent::Paste(data) => {
                if self.focus == PanelFocus::QueryEditor && !self.editor.paste(&data) {
                    self.set_status(
                        "Paste ignored in NORMAL mode (press i to insert)".to_string(),
                        StatusLevel::Warning,
                    );
                }
                Ok(Action::None)
            }
            AppEvent::Resize { width, height } => {
                self.resize(width, height);
                Ok(Action::None)
            }
            AppEvent::QueryCompleted(results) => {
                self.query_running = false;
                info!(rows = results.row_count(), "query completed");
                self.set_status(results.summary(), StatusLevel::Success);
                self.results_viewer.set_results(results);
                Ok(Action::None)
            }
            AppEvent::QueryFailed(error) => {
                self.query_running = false;
                warn!(%error, "query failed");
                self.notify(Notification::error("Query failed", &error));
                self.results_viewer.set_error(error);
                Ok(Action::None)
            }
            AppEvent::ConnectionLost(msg) => {
                warn!(%msg, "connection lost");
                self.set_status(msg, StatusLevel::Error);
                Ok(Action::None)
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        // errors stay up until another notification replaces them
        if self
            .status_message
            .as_ref()
            .is_some_and(|s| s.level != StatusLevel::Error)
        {
            self.status_message = None;
        }

        // KeyMap first: global bindings, then panel-specific
        if let Some(key_action) = self.keymap.resolve(self.focus, key) {
            return self.execute_key_action(key_action);
        }

        // Fall through to the editor's mode tables
        let component_action = match self.focus {
            PanelFocus::QueryEditor => self.editor.handle_key(key),
            _ => ComponentAction::Ignored,
        };
        self.process_component_action(component_action)
    }

    fn execute_key_action(&mut self, action: KeyAction) -> Action {
        match action {
            // ── Global ───────────────────────────────────────
            KeyAction::Quit => {
                self.running = false;
                Action::Quit
            }
            KeyAction::CycleFocus => {
                self.cycle_focus();
                Action::None
            }
            KeyAction::CycleFocusReverse => {
                self.cycle_focus_reverse();
                Action::None
            }

            // ── Navigation ───────────────────────────────────
            KeyAction::MoveUp => {
                match self.focus {
                    PanelFocus::TreeBrowser => self.tree_browser.move_up(),
                    PanelFocus::ResultsViewer => self.results_viewer.move_up(),
                    PanelFocus::QueryEditor => {}
                }
                Action::None
            }
            KeyAction::MoveDown => {
                match self.focus {
                    PanelFocus::TreeBrowser => self.tree_browser.move_down(),
                    PanelFocus::ResultsViewer => self.results_viewer.move_down(),
                    PanelFocus::QueryEditor => {}
                }
                Action::None
            }
            KeyAction::MoveLeft => {
                if self.focus == PanelFocus::ResultsViewer {
                    self.results_viewer.move_left();
                }
                Action::None
            }
            KeyAction::MoveRight => {
                if self.focus == PanelFocus::ResultsViewer {
                    self.results_viewer.move_right();
                }
                Action::None
            }
            KeyAction::PageUp => {
                if self.focus == PanelFocus::ResultsViewer {
                    self.results_viewer.page_up();
                }
                Action::None
            }
            KeyAction::PageDown => {
                if self.focus == PanelFocus::ResultsViewer {
                    self.results_viewer.page_down();
                }
                Action::None
            }
            KeyAction::GoToTop => {
                match self.focus {
                    PanelFocus::TreeBrowser => self.tree_browser.go_to_top(),
                    PanelFocus::ResultsViewer => self.results_viewer.go_to_top(),
                    PanelFocus::QueryEditor => {}
                }
                Action::None
            }
            KeyAction::GoToBottom => {
                match self.focus {
                    PanelFocus::TreeBrowser => self.tree_browser.go_to_bottom(),
                    PanelFocus::ResultsViewer => self.results_viewer.go_to_bottom(),
                    PanelFocus::QueryEditor => {}
                }
                Action::None
            }

            // ── Editor ───────────────────────────────────────
            KeyAction::ExecuteQuery => {
                let request = self.editor.execute_request();
                self.process_component_action(request)
            }

            // ── Tree ─────────────────────────────────────────
            KeyAction::Select => {
                let selection = self.tree_browser.select_current();
                self.process_component_action(selection)
            }
        }
    }

    /// Route a pane's request to its consumer.
    pub fn process_component_action(&mut self, action: ComponentAction) -> Action {
        match action {
            ComponentAction::Consumed | ComponentAction::Ignored => Action::None,
            ComponentAction::LoadQuery(query) => {
                self.editor.load_query(&query);
                self.focus = PanelFocus::QueryEditor;
                self.notify(Notification::info("Query loaded"));
                Action::None
            }
            ComponentAction::ExecuteQuery(sql) => {
                if sql.trim().is_empty() {
                    self.set_status("Nothing to execute".to_string(), StatusLevel::Warning);
                    return Action::None;
                }
                if self.query_running {
                    self.set_status(
                        "A query is already running".to_string(),
                        StatusLevel::Warning,
                    );
                    return Action::None;
                }
                self.query_running = true;
                info!(bytes = sql.len(), "dispatching query");
                self.set_status("Executing query...".to_string(), StatusLevel::Info);
                Action::ExecuteQuery(sql)
            }
            ComponentAction::Notify(notification) => {
                self.notify(notification);
                Action::None
            }
        }
    }

    /// Show a notification; one carrying an error is shown as an error.
    pub fn notify(&mut self, notification: Notification) {
        let level = if notification.error.is_some() {
            StatusLevel::Error
        } else {
            StatusLevel::Info
        };
        self.set_status(notification.text(), level);
    }

    /// Recompute the editor's box for a terminal of `width` x `height`.
    pub fn resize(&mut self, width: u16, height: u16) {
        let layout = calculate_layout(Rect::new(0, 0, width, height), self.tree_width);
        // minus the borders
        self.editor.resize(
            layout.editor.width.saturating_sub(2),
            layout.editor.height.saturating_sub(2),
        );
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            PanelFocus::TreeBrowser => PanelFocus::QueryEditor,
            PanelFocus::QueryEditor => PanelFocus::ResultsViewer,
            PanelFocus::ResultsViewer => PanelFocus::TreeBrowser,
        };
    }

    fn cycle_focus_reverse(&mut self) {
        self.focus = match self.focus {
            PanelFocus::TreeBrowser => PanelFocus::ResultsViewer,
            PanelFocus::QueryEditor => PanelFocus::TreeBrowser,
            PanelFocus::ResultsViewer => PanelFocus::QueryEditor,
        };
    }

    pub fn set_status(&mut self, message: String, level: StatusLevel) {
        self.status_message = Some(StatusMessage { message, level });
    }
}

/// Run `query` off the input loop and report its outcome on `tx`.
///
/// Exactly one `QueryCompleted` or `QueryFailed` is sent, even if the query
/// task panics, so `query_running` is always cleared.
pub fn spawn_query<F>(query: F, tx: mpsc::UnboundedSender<AppEvent>) -> JoinHandle<()>
where
    F: Future<Output = DbResult<QueryResults>> + Send + 'static,
{
    tokio::spawn(async move {
        let event = match tokio::spawn(query).await {
            Ok(Ok(results)) => AppEvent::QueryCompleted(results),
            Ok(Err(e)) => AppEvent::QueryFailed(e.to_string()),
            Err(e) => {
                error!(error = %e, "query task aborted");
                AppEvent::QueryFailed(format!("Query task aborted: {}", e))
            }
        };
        let _ = tx.send(event);
    })
}
