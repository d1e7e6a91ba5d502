//! Benchmark driver: randomized point reads and writes through a fixed
//! fan-out of concurrent workers.
//!
//! Each worker owns its result slot and a seeded RNG; nothing is shared
//! between workers except the cloned store handle. Aggregation happens only
//! after every worker has been joined.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::client::KvStoreClient;
use crate::error::{BenchError, Result};

/// Parameters for one benchmark run. Immutable once the run starts.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Operations each worker performs.
    pub ops_per_worker: usize,
    /// Keys are drawn uniformly from `[0, key_space)`.
    pub key_space: usize,
    /// Size of each written value in bytes.
    pub value_size: usize,
    /// Base RNG seed; worker `i` is seeded with `seed + i`. Random if unset.
    pub seed: Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        WorkloadConfig {
            ops_per_worker: 1000,
            key_space: 1000,
            value_size: 1024,
            seed: None,
        }
    }
}

/// What one worker accomplished before finishing or stopping on an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerResult {
    pub completed: usize,
    pub bytes: u64,
}

/// Summed worker results plus wall-clock duration for one concurrency level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResult {
    pub operation: String,
    pub concurrency: usize,
    pub ops_per_worker: usize,
    pub completed: usize,
    pub bytes: u64,
    pub duration_secs: f64,
}

impl AggregateResult {
    pub(crate) fn from_workers(
        operation: &str,
        ops_per_worker: usize,
        concurrency: usize,
        workers: &[WorkerResult],
        duration_secs: f64,
    ) -> Self {
        AggregateResult {
            operation: operation.to_string(),
            concurrency,
            ops_per_worker,
            completed: workers.iter().map(|w| w.completed).sum(),
            bytes: workers.iter().map(|w| w.bytes).sum(),
            duration_secs,
        }
    }

    /// Throughput in operations per second.
    pub fn ops_per_sec(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.completed as f64 / self.duration_secs
    }

    /// Throughput in bytes per second.
    pub fn bytes_per_sec(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.bytes as f64 / self.duration_secs
    }

    /// Print results to console
    pub fn print_summary(&self) {
        println!("\n=== {} Benchmark Results ===", self.operation);
        println!("Concurrency: {}", self.concurrency);
        println!("Duration: {:.3}s", self.duration_secs);
        println!();
        println!(
            "Completed: {} / {}",
            self.completed,
            self.ops_per_worker * self.concurrency
        );
        println!("Bytes: {}", self.bytes);
        println!(
            "Throughput: {:.0} ops/sec | {:.0} bytes/sec",
            self.ops_per_sec(),
            self.bytes_per_sec()
        );
    }
}

/// Benchmark key drawn uniformly from the key space.
pub fn bench_key<R: Rng>(rng: &mut R, key_space: usize) -> String {
    format!("hello-{}", rng.gen_range(0..key_space))
}

/// Drives read and write benchmarks against any [`KvStoreClient`].
pub struct LoadRunner<C: KvStoreClient> {
    client: C,
    config: WorkloadConfig,
}

impl<C: KvStoreClient> LoadRunner<C> {
    pub fn new(client: C, config: WorkloadConfig) -> Self {
        LoadRunner { client, config }
    }

    fn check_config(&self) -> Result<()> {
        if self.config.key_space == 0 {
            return Err(BenchError::Config("key space must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Single write+read round trip to validate connectivity before a run.
    /// Callers treat a failure here as fatal.
    pub async fn smoke_test(&self) -> Result<()> {
        self.client.ping().await?;
        self.client.set("hello", b"world").await?;
        let value = self.client.get("hello").await?;
        match value.as_deref() {
            Some(b"world") => Ok(()),
            other => Err(BenchError::SmokeTest(format!(
                "expected \"world\", got {:?}",
                other.map(String::from_utf8_lossy)
            ))),
        }
    }

    /// Run the write benchmark at the given concurrency level.
    ///
    /// Each worker performs `ops_per_worker` SET transactions of a random key
    /// and a freshly randomized buffer. On a client error the worker logs and
    /// stops early; siblings are unaffected and nothing is retried.
    pub async fn run_write(&self, concurrency: usize) -> Result<AggregateResult> {
        self.check_config()?;
        let n = self.config.ops_per_worker;
        let key_space = self.config.key_space;
        let value_size = self.config.value_size;
        let base_seed = self.config.seed.unwrap_or_else(rand::random);

        let start = Instant::now();
        let mut handles: Vec<JoinHandle<WorkerResult>> = Vec::with_capacity(concurrency);
        for id in 0..concurrency {
            let client = self.client.clone();
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(id as u64));
            handles.push(tokio::spawn(async move {
                let mut buf = vec![0u8; value_size];
                let mut result = WorkerResult::default();
                for _ in 0..n {
                    rng.fill_bytes(&mut buf);
                    let key = bench_key(&mut rng, key_space);
                    if let Err(e) = client.set(&key, &buf).await {
                        warn!(worker = id, error = %e, "write worker stopping early");
                        break;
                    }
                    result.completed += 1;
                    result.bytes += buf.len() as u64;
                }
                result
            }));
        }

        let mut workers = Vec::with_capacity(concurrency);
        for handle in handles {
            workers.push(handle.await?);
        }
        let duration_secs = start.elapsed().as_secs_f64();

        Ok(AggregateResult::from_workers(
            "SET",
            n,
            concurrency,
            &workers,
            duration_secs,
        ))
    }

    /// Run the read benchmark at the given concurrency level. Same structure
    /// and error policy as [`run_write`](Self::run_write); bytes are counted
    /// from returned values, and a missing key still counts as a completed
    /// operation.
    pub async fn run_read(&self, concurrency: usize) -> Result<AggregateResult> {
        self.check_config()?;
        let n = self.config.ops_per_worker;
        let key_space = self.config.key_space;
        let base_seed = self.config.seed.unwrap_or_else(rand::random);

        let start = Instant::now();
        let mut handles: Vec<JoinHandle<WorkerResult>> = Vec::with_capacity(concurrency);
        for id in 0..concurrency {
            let client = self.client.clone();
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(id as u64));
            handles.push(tokio::spawn(async move {
                let mut result = WorkerResult::default();
                for _ in 0..n {
                    let key = bench_key(&mut rng, key_space);
                    match client.get(&key).await {
                        Ok(value) => {
                            result.completed += 1;
                            if let Some(v) = value {
                                result.bytes += v.len() as u64;
                            }
                        }
                        Err(e) => {
                            warn!(worker = id, error = %e, "read worker stopping early");
                            break;
                        }
                    }
                }
                result
            }));
        }

        let mut workers = Vec::with_capacity(concurrency);
        for handle in handles {
            workers.push(handle.await?);
        }
        let duration_secs = start.elapsed().as_secs_f64();

        Ok(AggregateResult::from_workers(
            "GET",
            n,
            concurrency,
            &workers,
            duration_secs,
        ))
    }
}
