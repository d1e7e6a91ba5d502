use async_trait::async_trait;
use crate::error::ClientResult;

pub mod memory_adapter;
pub mod redis_adapter;

pub use memory_adapter::MemoryStore;
pub use redis_adapter::RedisStore;

pub use crate::error::ClientError;

/// The seam between the harness and the external key-value store.
///
/// Every call is a single transaction: the store client commits (and, if it
/// chooses, retries) internally and the harness only observes success or
/// failure. Implementations must tolerate concurrent use from many workers,
/// which is why the trait is `Clone` — each worker runs on its own handle.
#[async_trait]
pub trait KvStoreClient: Send + Sync + Clone + 'static {
    /// Verify the store is reachable.
    async fn ping(&self) -> ClientResult<()>;

    /// Read a key. `None` means the key does not exist.
    async fn get(&self, key: &str) -> ClientResult<Option<Vec<u8>>>;

    /// Write a key.
    async fn set(&self, key: &str, value: &[u8]) -> ClientResult<()>;
}
