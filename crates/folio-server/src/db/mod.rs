use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::{Config, DatabaseConfig};
use crate::store::{MemoryStore, PgStore, ProfileStore};

pub type DbPool = PgPool;

fn connect_options(database: &DatabaseConfig) -> anyhow::Result<PgConnectOptions> {
    let options = match database {
        DatabaseConfig::Url(url) => PgConnectOptions::from_str(url)?,
        DatabaseConfig::Parts {
            host,
            port,
            user,
            password,
            name,
        } => {
            let mut options = PgConnectOptions::new().host(host).port(*port);
            if let Some(user) = user {
                options = options.username(user);
            }
            if let Some(password) = password {
                options = options.password(password);
            }
            if let Some(name) = name {
                options = options.database(name);
            }
            options
        }
    };

    Ok(options)
}

pub async fn create_pool(
    database: &DatabaseConfig,
    max_connections: u32,
) -> anyhow::Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(connect_options(database)?)
        .await?;

    Ok(pool)
}

/// Open the configured store, falling back to memory when no database is set
pub async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn ProfileStore>> {
    let Some(database) = &config.database else {
        tracing::warn!("No database configured, profiles are kept in memory only");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let pool = create_pool(database, config.max_connections).await?;

    if config.run_migrations {
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(Arc::new(PgStore::new(pool)))
}
