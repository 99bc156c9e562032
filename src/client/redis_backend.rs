//! Redis Backend
//!
//! `BackingStore` implementation over a multiplexed async Redis connection.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use tracing::{debug, info};

use crate::client::BackingStore;
use crate::error::BackendError;

/// Redis-backed store. The multiplexed connection is cloned per request and
/// pipelines concurrent commands over a single socket.
#[derive(Clone)]
pub struct RedisBackend {
    connection: MultiplexedConnection,
}

impl RedisBackend {
    /// Connects to `address`, given either as `host:port` or a full
    /// `redis://` URL.
    pub async fn connect(address: &str) -> Result<Self, BackendError> {
        let url = if address.starts_with("redis://") || address.starts_with("rediss://") {
            address.to_string()
        } else {
            format!("redis://{}", address)
        };

        let client = redis::Client::open(url.as_str())?;
        let connection = client.get_multiplexed_async_connection().await?;
        info!("Connected to Redis backend at {}", address);

        Ok(Self { connection })
    }

    /// Writes every lowercase letter mapped to itself, for local trials.
    pub async fn seed_lowercase_letters(&self) -> Result<(), BackendError> {
        let mut conn = self.connection.clone();
        for c in 'a'..='z' {
            let key = c.to_string();
            redis::cmd("SET")
                .arg(&key)
                .arg(&key)
                .query_async::<()>(&mut conn)
                .await?;
        }
        debug!("Seeded backend with lowercase letters");
        Ok(())
    }
}

#[async_trait]
impl BackingStore for RedisBackend {
    async fn get(&self, key: &str) -> Result<String, BackendError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        value.ok_or(BackendError::NotFound)
    }
}
