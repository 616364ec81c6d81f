//! Integration tests for PostgresProvider

use sqlpane::config::ConnectionConfig;
use sqlpane::config::connections::SslMode;
use sqlpane::db::schema::{column_query, foreign_key_query, list_query};
use sqlpane::db::types::CellValue;
use sqlpane::db::{Database, PostgresProvider, discover};
use sqlpane::error::DbError;

/// Get test database connection config
fn test_config() -> ConnectionConfig {
    ConnectionConfig {
        name: "integration-test".to_string(),
        host: std::env::var("TEST_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
        port: std::env::var("TEST_DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5433),
        database: std::env::var("TEST_DB_NAME").unwrap_or_else(|_| "test_db".to_string()),
        username: std::env::var("TEST_DB_USER").unwrap_or_else(|_| "test_user".to_string()),
        password: Some(
            std::env::var("TEST_DB_PASSWORD").unwrap_or_else(|_| "test_password".to_string()),
        ),
        ssl_mode: SslMode::Disable,
    }
}

async fn connect() -> Option<PostgresProvider> {
    let config = test_config();
    match PostgresProvider::connect(&config).await {
        Ok((provider, _)) => Some(provider),
        Err(e) => {
            eprintln!(
                "Skipping test: Database not available at {}:{} - {}",
                config.host, config.port, e
            );
            None
        }
    }
}

#[tokio::test]
async fn test_database_name() {
    let Some(provider) = connect().await else {
        return;
    };
    assert_eq!(provider.name().await.unwrap(), test_config().database);
}

#[tokio::test]
async fn test_execute_simple_query() {
    let Some(provider) = connect().await else {
        return;
    };

    let results = provider
        .execute_query("SELECT 1 as num, 'hello' as msg, NULL::text as nothing")
        .await
        .unwrap();
    assert_eq!(results.columns.len(), 3);
    assert_eq!(results.columns[0].name, "num");
    assert_eq!(results.row_count(), 1);

    let row = &results.rows[0];
    match &row.values[0] {
        CellValue::Integer(n) => assert_eq!(*n, 1),
        other => panic!("Expected Integer, got {:?}", other),
    }
    match &row.values[1] {
        CellValue::Text(s) => assert_eq!(s, "hello"),
        other => panic!("Expected Text, got {:?}", other),
    }
    assert!(row.values[2].is_null());
}

#[tokio::test]
async fn test_numeric_and_json_values() {
    let Some(provider) = connect().await else {
        return;
    };

    let results = provider
        .execute_query("SELECT 12.50::numeric AS amount, '{\"a\": 1}'::jsonb AS doc")
        .await
        .unwrap();
    let row = &results.rows[0];
    match &row.values[0] {
        CellValue::Text(s) => assert_eq!(s, "12.50"),
        other => panic!("Expected Text for numeric, got {:?}", other),
    }
    match &row.values[1] {
        CellValue::Json(v) => assert_eq!(v["a"], 1),
        other => panic!("Expected Json, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_query() {
    let Some(provider) = connect().await else {
        return;
    };
    let err = provider
        .execute_query("SELECT * FROM sqlpane_nonexistent_table")
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::QueryFailed(_)));
}

#[tokio::test]
async fn test_discover_and_run_leaf_queries() {
    let Some(provider) = connect().await else {
        return;
    };

    let (tree, error) = discover(Some(&provider)).await;
    assert!(error.is_none(), "discovery failed: {:?}", error);
    assert_eq!(tree.flat()[0].title, test_config().database);

    let tables = provider.list_tables().await.unwrap();
    let Some(table) = tables.first() else {
        eprintln!("Skipping leaf queries: test database has no tables");
        return;
    };
    for sql in [list_query(table), column_query(table), foreign_key_query(table)] {
        let result = provider.execute_query(&sql).await;
        assert!(result.is_ok(), "{} failed: {:?}", sql, result.err());
    }
}

#[tokio::test]
async fn test_connection_failure() {
    let mut config = test_config();
    config.port = 1;
    let result = PostgresProvider::connect(&config).await;
    assert!(matches!(result, Err(DbError::ConnectionFailed(_))));
}
