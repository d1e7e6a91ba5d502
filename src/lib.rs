pub mod bench;
pub mod client;
pub mod error;
pub mod output;

pub use bench::{AggregateResult, LoadRunner, WorkerResult, WorkloadConfig};
pub use client::{ClientError, KvStoreClient, MemoryStore, RedisStore};
pub use error::BenchError;
