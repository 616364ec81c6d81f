//! Connection configuration
//!
//! Connection profiles from ~/.sqlpane/connections.toml, or a single
//! `postgres://` URL from the command line.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Profile name, shown in the status line
    pub name: String,

    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    pub database: String,

    pub username: String,

    #[serde(skip_serializing)]
    pub password: Option<String>,

    #[serde(default)]
    pub ssl_mode: SslMode,
}

/// SSL connection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SslMode {
    Disable,
    #[default]
    Prefer,
    Require,
}

impl SslMode {
    fn parse(value: &str) -> ConfigResult<Self> {
        match value {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            other => Err(ConfigError::Invalid(format!("Unsupported sslmode: {}", other))),
        }
    }
}

impl From<SslMode> for tokio_postgres::config::SslMode {
    fn from(mode: SslMode) -> Self {
        match mode {
            SslMode::Disable => tokio_postgres::config::SslMode::Disable,
            SslMode::Prefer => tokio_postgres::config::SslMode::Prefer,
            SslMode::Require => tokio_postgres::config::SslMode::Require,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConnectionsFile {
    #[serde(default)]
    connections: Vec<ConnectionConfig>,
}

fn default_port() -> u16 {
    5432
}

impl ConnectionConfig {
    /// Parse `postgres://[user[:password]@]host[:port]/dbname[?sslmode=..]`.
    pub fn from_url(url: &str) -> ConfigResult<Self> {
        let url = url.trim();
        let rest = url
            .strip_prefix("postgres://")
            .or_else(|| url.strip_prefix("postgresql://"))
            .ok_or_else(|| ConfigError::Invalid("URL must start with postgres://".into()))?;

        let (rest, query) = match rest.split_once('?') {
            Some((r, q)) => (r, Some(q)),
            None => (rest, None),
        };

        let (creds, location) = match rest.rsplit_once('@') {
            Some((c, l)) => (Some(c), l),
            None => (None, rest),
        };

        let (username, password) = match creds {
            Some(c) => match c.split_once(':') {
                Some((u, p)) => (u.to_string(), Some(p.to_string())),
                None => (c.to_string(), None),
            },
            None => (default_username(), None),
        };

        let (host_port, database) = location
            .split_once('/')
            .ok_or_else(|| ConfigError::Invalid("URL must contain /dbname".into()))?;
        if database.is_empty() {
            return Err(ConfigError::Invalid("URL has an empty database name".into()));
        }

        let (host, port) = match host_port.split_once(':') {
            Some((h, p)) => {
                let port = p
                    .parse::<u16>()
                    .map_err(|_| ConfigError::Invalid(format!("Invalid port: {}", p)))?;
                (h, port)
            }
            None => (host_port, default_port()),
        };
        let host = if host.is_empty() { "localhost" } else { host };

        let mut ssl_mode = SslMode::default();
        for param in query.into_iter().flat_map(|q| q.split('&')) {
            if let Some(value) = param.strip_prefix("sslmode=") {
                ssl_mode = SslMode::parse(value)?;
            }
        }

        Ok(Self {
            name: format!("{}@{}", database, host),
            host: host.to_string(),
            port,
            database: database.to_string(),
            username,
            password,
            ssl_mode,
        })
    }

    /// Driver configuration, password included. Values are passed through
    /// as-is, so spaces and quotes need no escaping.
    pub fn pg_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.database)
            .user(&self.username)
            .ssl_mode(self.ssl_mode.into());
        if let Some(ref pw) = self.password {
            config.password(pw);
        }
        config
    }

    /// Get the config directory path (~/.sqlpane/)
    pub fn config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".sqlpane"))
    }
}

fn default_username() -> String {
    std::env::var("USER").unwrap_or_else(|_| "postgres".to_string())
}

/// Read every profile from a connections file. A missing file is empty.
pub fn load_connections_from(path: &Path) -> ConfigResult<Vec<ConnectionConfig>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::NotFound(format!("{}: {}", path.display(), e)))?;
    let file: ConnectionsFile = toml::from_str(&content)?;
    Ok(file.connections)
}

/// Find a profile by name in ~/.sqlpane/connections.toml
pub fn find_connection(name: &str) -> ConfigResult<ConnectionConfig> {
    let path = ConnectionConfig::config_dir()?.join("connections.toml");
    load_connections_from(&path)?
        .into_iter()
        .find(|c| c.name == name)
        .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
}

/// Pick the connection to open. A named profile wins over a URL, since the
/// URL may only have come from `DATABASE_URL`. `Ok(None)` means there is
/// nothing to connect to.
pub fn resolve_connection(
    url: Option<&str>,
    profile: Option<&str>,
) -> ConfigResult<Option<ConnectionConfig>> {
    match (profile, url) {
        (Some(profile), _) => find_connection(profile).map(Some),
        (None, Some(url)) => ConnectionConfig::from_url(url).map(Some),
        (None, None) => Ok(None),
    }
}
