use async_trait::async_trait;
use redis::aio::Connection;
use redis::{Client, RedisError};

use super::{ClientError, KvStoreClient};
use crate::error::ClientResult;

/// Store adapter backed by the `redis` crate.
///
/// Point reads and writes go out as atomic `MULTI`/`EXEC` pipelines so each
/// benchmark operation is one transaction on the wire.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
}

impl RedisStore {
    pub fn new(url: &str) -> ClientResult<Self> {
        let client = Client::open(url).map_err(|e| ClientError::Connection(e.to_string()))?;
        Ok(RedisStore { client })
    }

    async fn get_connection(&self) -> ClientResult<Connection> {
        self.client
            .get_async_connection()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))
    }

    fn handle_redis_error(e: RedisError) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout(e.to_string())
        } else if e.is_connection_refusal() || e.is_connection_dropped() {
            ClientError::Connection(e.to_string())
        } else {
            ClientError::Operation(e.to_string())
        }
    }
}

#[async_trait]
impl KvStoreClient for RedisStore {
    async fn ping(&self) -> ClientResult<()> {
        let mut conn = self.get_connection().await?;
        redis::cmd("PING")
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(Self::handle_redis_error)
    }

    async fn get(&self, key: &str) -> ClientResult<Option<Vec<u8>>> {
        let mut conn = self.get_connection().await?;
        let (value,): (Option<Vec<u8>>,) = redis::pipe()
            .atomic()
            .get(key)
            .query_async(&mut conn)
            .await
            .map_err(Self::handle_redis_error)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8]) -> ClientResult<()> {
        let mut conn = self.get_connection().await?;
        redis::pipe()
            .atomic()
            .set(key, value)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(Self::handle_redis_error)
    }
}
