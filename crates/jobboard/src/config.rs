//! Environment-driven database configuration.

use crate::error::{ModelError, ModelResult};
use crate::pool;
use deadpool_postgres::Pool;

const DEFAULT_POOL_SIZE: usize = 16;

/// Database settings read from the process environment.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection URL (`DATABASE_URL`)
    pub url: String,
    /// Maximum pool size (`DATABASE_POOL_SIZE`, default 16)
    pub pool_size: usize,
}

impl DatabaseConfig {
    /// Read configuration from `DATABASE_URL` and `DATABASE_POOL_SIZE`.
    pub fn from_env() -> ModelResult<Self> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| ModelError::Connection("DATABASE_URL is not set".to_string()))?;
        let pool_size = match std::env::var("DATABASE_POOL_SIZE") {
            Ok(v) => v.parse().map_err(|_| {
                ModelError::Connection(format!("invalid DATABASE_POOL_SIZE '{v}'"))
            })?,
            Err(_) => DEFAULT_POOL_SIZE,
        };
        Ok(Self { url, pool_size })
    }

    /// Build a connection pool from this configuration.
    pub fn create_pool(&self) -> ModelResult<Pool> {
        pool::create_pool_with_config(&self.url, self.pool_size)
    }
}
