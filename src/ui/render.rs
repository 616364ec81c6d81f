//! Top-level render function
//!
//! Orchestrates rendering of all panels using the layout module.

use crate::app::{App, PanelFocus, StatusLevel};
use crate::editor::Mode;
use crate::ui::Component;
use crate::ui::layout::calculate_layout;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let layout = calculate_layout(frame.area(), app.tree_width);

    render_panel(
        frame,
        layout.tree,
        Line::from(" Schema "),
        app.focus == PanelFocus::TreeBrowser,
        &app.tree_browser,
        theme,
    );

    let mode = app.editor.mode();
    let mode_style = match mode {
        Mode::Normal => theme.mode_normal,
        Mode::Insert => theme.mode_insert,
    };
    let mut editor_title = vec![
        Span::raw(" Query "),
        Span::styled(format!(" {} ", mode.label()), mode_style),
        Span::raw(" "),
    ];
    if app.query_running {
        editor_title.push(Span::styled("running… ", theme.status_warning));
    }
    render_panel(
        frame,
        layout.editor,
        Line::from(editor_title),
        app.focus == PanelFocus::QueryEditor,
        &app.editor,
        theme,
    );

    render_panel(
        frame,
        layout.results,
        Line::from(" Results "),
        app.focus == PanelFocus::ResultsViewer,
        &app.results_viewer,
        theme,
    );

    render_status_line(frame, layout.status, app, theme);
}

fn render_panel(
    frame: &mut Frame,
    area: Rect,
    title: Line,
    focused: bool,
    component: &dyn Component,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    component.render(frame, inner, focused, theme);
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let conn_info = match app.connection_name {
        Some(ref name) => format!("[{}]", name),
        None => "[disconnected]".to_string(),
    };

    let paragraph = if let Some(ref status) = app.status_message {
        let style = match status.level {
            StatusLevel::Info => theme.status_info,
            StatusLevel::Success => theme.status_success,
            StatusLevel::Warning => theme.status_warning,
            StatusLevel::Error => theme.status_error,
        };
        Paragraph::new(format!("{} {}", conn_info, status.message)).style(style)
    } else {
        Paragraph::new(format!(
            "{} | Tab switch panel | i/Esc mode | Ctrl+E run | Ctrl+Q quit",
            conn_info
        ))
        .style(theme.status_hint)
    };
    frame.render_widget(paragraph, area);
}
