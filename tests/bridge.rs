//! End-to-end tests: discovery, tree selection, editor and execution
//! wired together through `App` against a mock database.

mod common;

use common::{MockDatabase, ctrl, key, sample_tree, settings};
use crossterm::event::KeyCode;
use sqlpane::app::{Action, App, AppEvent, PanelFocus};
use sqlpane::db::{Database, SchemaTree, discover};
use sqlpane::editor::Mode;
use sqlpane::error::DbError;

/// Run whatever the app asked for against `db` and feed the outcome back,
/// the way the binary's event loop does.
async fn drive(app: &mut App, db: &MockDatabase, action: Action) {
    if let Action::ExecuteQuery(sql) = action {
        let event = match db.execute_query(&sql).await {
            Ok(results) => AppEvent::QueryCompleted(results),
            Err(e) => AppEvent::QueryFailed(e.to_string()),
        };
        assert_eq!(app.handle_event(event).unwrap(), Action::None);
    }
}

fn press(app: &mut App, code: KeyCode) -> Action {
    app.handle_event(AppEvent::Key(key(code))).unwrap()
}

#[tokio::test]
async fn test_discover_builds_closed_tree() {
    let db = MockDatabase::sample();
    let (mut tree, error) = discover(Some(&db)).await;

    assert!(error.is_none());
    assert_eq!(tree.flat().len(), 1);
    assert_eq!(tree.flat()[0].title, "sample");
    // root + 2 tables + 3 leaves each
    assert_eq!(tree.node_count(), 9);

    tree.select(0);
    let titles: Vec<_> = tree.flat().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["sample", "users", "orders"]);
}

#[tokio::test]
async fn test_discover_without_connection() {
    let (tree, error) = discover::<MockDatabase>(None).await;
    assert_eq!(error, Some(DbError::NotConnected));
    assert_eq!(tree.flat().len(), 1);
    assert!(tree.flat()[0].is_leaf);
}

#[tokio::test]
async fn test_discover_failures_give_placeholder() {
    for db in [
        MockDatabase::sample().with_name_error("permission denied"),
        MockDatabase::sample().with_tables_error("relation does not exist"),
    ] {
        let (tree, error) = discover(Some(&db)).await;
        assert!(matches!(error, Some(DbError::SchemaLoadFailed(_))));
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.flat()[0].title, SchemaTree::placeholder().flat()[0].title);
    }
}

#[tokio::test]
async fn test_leaf_to_results_round_trip() {
    let db = MockDatabase::sample();
    let (tree, _) = discover(Some(&db)).await;
    let mut app = App::with_connection("sample".to_string(), tree, &settings());
    assert_eq!(app.focus, PanelFocus::TreeBrowser);

    // open root, open users, pick its list leaf
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.tree_browser.tree().flat().len(), 6);
    press(&mut app, KeyCode::Down);
    assert_eq!(press(&mut app, KeyCode::Enter), Action::None);

    assert_eq!(app.focus, PanelFocus::QueryEditor);
    assert_eq!(app.editor.content(), "SELECT * FROM \"users\";");
    assert_eq!(app.editor.mode(), Mode::Normal);

    let action = app.handle_event(AppEvent::Key(ctrl('e'))).unwrap();
    assert_eq!(
        action,
        Action::ExecuteQuery("SELECT * FROM \"users\";".to_string())
    );
    assert!(app.query_running);

    drive(&mut app, &db, action).await;
    assert!(!app.query_running);
    assert_eq!(db.executed(), vec!["SELECT * FROM \"users\";".to_string()]);
    let results = app.results_viewer.results().unwrap();
    assert_eq!(results.row_count(), 1);
    assert_eq!(results.columns[1].name, "name");
    // focus stays put
    assert_eq!(app.focus, PanelFocus::QueryEditor);
}

#[tokio::test]
async fn test_typed_query_failure_is_reported() {
    let db = MockDatabase::sample().with_query_error("syntax error at or near \"SELEC\"");
    let mut app = App::new(sample_tree(), &settings());
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, PanelFocus::QueryEditor);

    press(&mut app, KeyCode::Char('i'));
    for c in "SELEC 1".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    assert_eq!(app.editor.content(), "SELEC 1");

    let action = press(&mut app, KeyCode::F(5));
    drive(&mut app, &db, action).await;

    assert!(!app.query_running);
    assert!(app.results_viewer.error().unwrap().contains("SELEC"));
    let status = app.status_message.as_ref().unwrap();
    assert!(status.message.contains("Query failed"));
}

#[tokio::test]
async fn test_second_execute_waits_for_first() {
    let db = MockDatabase::sample();
    let mut app = App::new(sample_tree(), &settings());
    app.editor.load_query("SELECT 1");
    app.focus = PanelFocus::QueryEditor;

    let first = app.handle_event(AppEvent::Key(ctrl('e'))).unwrap();
    let second = app.handle_event(AppEvent::Key(ctrl('e'))).unwrap();
    assert!(matches!(first, Action::ExecuteQuery(_)));
    assert_eq!(second, Action::None);

    drive(&mut app, &db, first).await;
    assert_eq!(db.executed().len(), 1);

    let third = app.handle_event(AppEvent::Key(ctrl('e'))).unwrap();
    assert!(matches!(third, Action::ExecuteQuery(_)));
}

#[test]
fn test_mock_answers_synchronously() {
    let db = MockDatabase::sample();
    let name = tokio_test::block_on(db.name()).unwrap();
    let tables = tokio_test::block_on(db.list_tables()).unwrap();
    assert_eq!(name, "sample");
    assert_eq!(tables, vec!["users", "orders"]);
}
