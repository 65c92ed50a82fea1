//! Connection configuration and pool construction.
//!
//! Settings come from the process environment, optionally primed from an
//! `.env.{PARKS_ENV}` file. The resulting [`PgPool`] is handed explicitly to
//! whatever needs a connection; nothing here holds a global pool.

use std::path::Path;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;
use tracing::{debug, info};

use crate::errors::DbError;

const DEFAULT_ENV: &str = "development";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Loads `.env.{PARKS_ENV}` from `dir` into the process environment.
///
/// `PARKS_ENV` defaults to `development`. Variables already set in the
/// environment take precedence, and a missing file is not an error.
pub fn load_env_file(dir: impl AsRef<Path>) -> Result<(), DbError> {
    let env = std::env::var("PARKS_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());
    let path = dir.as_ref().join(format!(".env.{env}"));

    match dotenvy::from_path(&path) {
        Ok(()) => {
            debug!("Loaded environment from {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(DbError::Config(format!(
            "failed to load {}: {e}",
            path.display()
        ))),
    }
}

/// Settings for the Postgres connection pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Schema every pooled connection is pinned to via `search_path`.
    pub schema: Option<String>,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            schema: None,
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, DbError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// `DATABASE_URL` is required. `DATABASE_MAX_CONNECTIONS`,
    /// `DATABASE_ACQUIRE_TIMEOUT_SECS` and `DATABASE_SCHEMA` are optional.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DbError> {
        let url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or_else(|| DbError::Config("DATABASE_URL must be set".to_string()))?;

        let mut config = Self::new(url);

        if let Some(raw) = lookup("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", &raw)?;
        }
        if let Some(raw) = lookup("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            let secs: u64 = parse_var("DATABASE_ACQUIRE_TIMEOUT_SECS", &raw)?;
            config.acquire_timeout = Duration::from_secs(secs);
        }
        if let Some(schema) = lookup("DATABASE_SCHEMA").filter(|s| !s.is_empty()) {
            config = config.with_schema(schema)?;
        }

        Ok(config)
    }

    /// Pins every connection to `schema`.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Result<Self, DbError> {
        let schema = schema.into();
        validate_schema_name(&schema)?;
        self.schema = Some(schema);
        Ok(self)
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Builds the connection pool.
    pub async fn connect(&self) -> Result<PgPool, DbError> {
        let mut options = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout);

        if let Some(schema) = &self.schema {
            let set_search_path = format!("SET search_path TO {schema}");
            options = options.after_connect(move |conn, _meta| {
                let sql = set_search_path.clone();
                Box::pin(async move {
                    conn.execute(sql.as_str()).await?;
                    Ok(())
                })
            });
        }

        let pool = options.connect(&self.url).await?;

        info!(
            "Connected to database (max_connections={}, schema={})",
            self.max_connections,
            self.schema.as_deref().unwrap_or("default")
        );
        Ok(pool)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, DbError> {
    raw.trim()
        .parse()
        .map_err(|_| DbError::Config(format!("{key} has an invalid value: {raw:?}")))
}

/// Schema names are interpolated into `SET search_path`, so only plain
/// lowercase identifiers are accepted.
fn validate_schema_name(schema: &str) -> Result<(), DbError> {
    let mut chars = schema.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if valid_start && valid_rest && schema.len() <= 63 {
        Ok(())
    } else {
        Err(DbError::Config(format!("invalid schema name: {schema:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_requires_database_url() {
        let err = DatabaseConfig::from_vars(vars(&[])).unwrap_err();
        assert!(matches!(err, DbError::Config(_)));

        let err = DatabaseConfig::from_vars(vars(&[("DATABASE_URL", "")])).unwrap_err();
        assert!(matches!(err, DbError::Config(_)));
    }

    #[test]
    fn test_defaults() {
        let config =
            DatabaseConfig::from_vars(vars(&[("DATABASE_URL", "postgres://localhost/parks")]))
                .unwrap();
        assert_eq!(config.url, "postgres://localhost/parks");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
        assert_eq!(config.schema, None);
    }

    #[test]
    fn test_overrides() {
        let config = DatabaseConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://localhost/parks_test"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECS", " 30 "),
            ("DATABASE_SCHEMA", "seed_run_1"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.acquire_timeout, Duration::from_secs(30));
        assert_eq!(config.schema.as_deref(), Some("seed_run_1"));
    }

    #[test]
    fn test_invalid_number() {
        let err = DatabaseConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://localhost/parks"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DATABASE_MAX_CONNECTIONS"));
    }

    #[test]
    fn test_schema_name_validation() {
        let base = DatabaseConfig::new("postgres://localhost/parks");
        assert!(base.clone().with_schema("_scratch").is_ok());
        assert!(base.clone().with_schema("test_0a1b").is_ok());
        assert!(base.clone().with_schema("").is_err());
        assert!(base.clone().with_schema("1abc").is_err());
        assert!(base.clone().with_schema("Public").is_err());
        assert!(base.clone().with_schema("x; DROP TABLE parks").is_err());
        assert!(base.with_schema("a".repeat(64)).is_err());
    }

    #[test]
    fn test_missing_env_file_is_ignored() {
        assert!(load_env_file("/nonexistent/parks-config-dir").is_ok());
    }
}
