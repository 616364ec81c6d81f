//! Error types for sqlpane
//!
//! One enum per boundary, composed into `SqlpaneError` at the top.
//! We use `thiserror` for library-style errors with clear error chains.

use std::io;

/// Main error type for the sqlpane application
#[derive(Debug, thiserror::Error)]
pub enum SqlpaneError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors reported by the database collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DbError {
    /// Failed to establish connection
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    /// Database name or table listing could not be read
    #[error("Schema loading failed: {0}")]
    SchemaLoadFailed(String),

    /// Not connected to a database
    #[error("Not connected to database")]
    NotConnected,
}

/// Configuration loading/parsing errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Home directory not found
    #[error("Could not determine home directory")]
    NoHomeDir,

    /// Config file could not be read
    #[error("Configuration file not readable: {0}")]
    NotFound(String),

    /// Failed to parse TOML
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Connection profile not found
    #[error("Connection profile '{0}' not found")]
    ProfileNotFound(String),
}

/// Specialized Result type for sqlpane operations
pub type Result<T> = std::result::Result<T, SqlpaneError>;

/// Specialized Result type for database operations
pub type DbResult<T> = std::result::Result<T, DbError>;

/// Specialized Result type for config operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_converts_into_top_level() {
        let err: SqlpaneError = DbError::NotConnected.into();
        assert_eq!(err.to_string(), "Database error: Not connected to database");
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::ProfileNotFound("staging".to_string());
        assert_eq!(err.to_string(), "Connection profile 'staging' not found");
    }
}
