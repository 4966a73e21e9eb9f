use std::env;
#[cfg(feature = "postgres")]
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};
#[cfg(feature = "postgres")]
use tokio::sync::OnceCell;

/// Store configuration errors. Fatal for any code path that needs the store.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Configuration for the relational store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            min_connections: Self::DEFAULT_MIN_CONNECTIONS,
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` is required (`VITE_DATABASE_URL` is accepted as a
    /// fallback name). Pool sizes come from `DB_MAX_CONNECTIONS` and
    /// `DB_MIN_CONNECTIONS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = ["DATABASE_URL", "VITE_DATABASE_URL"]
            .into_iter()
            .filter_map(|name| lookup(name))
            .find(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let mut config = Self::new(url);
        if let Some(max) = parse_count(&lookup, "DB_MAX_CONNECTIONS")? {
            config.max_connections = max;
        }
        if let Some(min) = parse_count(&lookup, "DB_MIN_CONNECTIONS")? {
            config.min_connections = min;
        }
        config.min_connections = config.min_connections.min(config.max_connections);

        Ok(config)
    }
}

fn parse_count<F>(lookup: &F, name: &'static str) -> Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ConfigError::InvalidNumber { name, value }),
    }
}

#[cfg(feature = "postgres")]
static STORE: OnceCell<Arc<DbConn>> = OnceCell::const_new();

/// Process-wide store handle.
///
/// The first call opens the pool; later calls share the same connection
/// and ignore `config`. The pool lives until process exit.
#[cfg(feature = "postgres")]
pub async fn store(config: &DatabaseConfig) -> Result<Arc<DbConn>, DbErr> {
    STORE
        .get_or_try_init(|| async { connect(config).await.map(Arc::new) })
        .await
        .map(Arc::clone)
}

#[cfg(feature = "postgres")]
async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    let opts = ConnectOptions::new(config.url.clone())
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout)
        .sqlx_logging(true)
        .to_owned();

    let conn = Database::connect(opts).await?;
    tracing::info!(
        "Database connected (pool: {}..{})",
        config.min_connections,
        config.max_connections
    );

    Ok(conn)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_missing_url_is_an_error() {
        let err = DatabaseConfig::from_vars(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingDatabaseUrl));
        assert_eq!(err.to_string(), "DATABASE_URL is not set");

        let err = DatabaseConfig::from_vars(lookup(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingDatabaseUrl));
    }

    #[test]
    fn test_defaults_and_fallback_name() {
        let config =
            DatabaseConfig::from_vars(lookup(&[("VITE_DATABASE_URL", "postgres://localhost/quill")]))
                .unwrap();
        assert_eq!(config, DatabaseConfig::new("postgres://localhost/quill"));

        let config = DatabaseConfig::from_vars(lookup(&[
            ("DATABASE_URL", ""),
            ("VITE_DATABASE_URL", "postgres://localhost/quill"),
        ]))
        .unwrap();
        assert_eq!(config.url, "postgres://localhost/quill");
    }

    #[test]
    fn test_pool_sizes() {
        let config = DatabaseConfig::from_vars(lookup(&[
            ("DATABASE_URL", "postgres://db/quill"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_MIN_CONNECTIONS", "8"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.min_connections, 4);

        let err = DatabaseConfig::from_vars(lookup(&[
            ("DATABASE_URL", "postgres://db/quill"),
            ("DB_MAX_CONNECTIONS", "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                name: "DB_MAX_CONNECTIONS",
                ..
            }
        ));
    }
}
