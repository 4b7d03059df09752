use std::env;

use anyhow::Context;

/// Where the profile store lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: Option<String>,
        password: Option<String>,
        name: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` runs the server on the in-memory store
    pub database: Option<DatabaseConfig>,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database = match var("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig::Url(url)),
            None => match var("DB_HOST") {
                Some(host) => Some(DatabaseConfig::Parts {
                    host,
                    port: var("DB_PORT")
                        .unwrap_or_else(|| "5432".to_string())
                        .parse()
                        .context("DB_PORT must be a port number")?,
                    user: var("DB_USER"),
                    password: var("DB_PASSWORD"),
                    name: var("DB_NAME"),
                }),
                None => None,
            },
        };

        Ok(Self {
            database,
            max_connections: var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            run_migrations: var("RUN_MIGRATIONS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(true),
            port: var("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .context("PORT must be a port number")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.database, None);
        assert_eq!(config.max_connections, 10);
        assert!(config.run_migrations);
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_database_url_wins_over_parts() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/folio"),
            ("DB_HOST", "db"),
        ])
        .unwrap();
        assert_eq!(
            config.database,
            Some(DatabaseConfig::Url("postgres://localhost/folio".to_string()))
        );
    }

    #[test]
    fn test_database_from_parts() {
        let config = config(&[
            ("DB_HOST", "db"),
            ("DB_USER", "folio"),
            ("DB_PASSWORD", "p@ss:word"),
            ("DB_NAME", "cards"),
            ("RUN_MIGRATIONS", "false"),
        ])
        .unwrap();
        assert_eq!(
            config.database,
            Some(DatabaseConfig::Parts {
                host: "db".to_string(),
                port: 5432,
                user: Some("folio".to_string()),
                password: Some("p@ss:word".to_string()),
                name: Some("cards".to_string()),
            })
        );
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        assert!(config(&[("PORT", "http")]).is_err());
    }
}
