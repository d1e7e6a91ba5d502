//! kvload CLI
//!
//! Drives randomized transactional reads and writes against a key-value
//! store and reports throughput per concurrency level.

use clap::Parser;

use kvload::bench::{LoadRunner, WorkloadConfig};
use kvload::client::{KvStoreClient, MemoryStore, RedisStore};
use kvload::output::{format_run_result, write_output, OutputFormat};

#[derive(Parser)]
#[command(name = "kvload")]
#[command(about = "Transactional key-value load generator", long_about = None)]
struct Cli {
    /// Store connection URL
    #[arg(short, long, default_value = "redis://127.0.0.1:6379")]
    url: String,

    /// Use an in-process store instead of a server
    #[arg(long)]
    memory: bool,

    /// Key space size (keys are drawn uniformly from it)
    #[arg(long, default_value = "1000")]
    num_blocks: usize,

    /// Operations per worker
    #[arg(long, default_value = "1000")]
    blocks_per_task: usize,

    /// Value size in bytes
    #[arg(long, default_value = "1024")]
    block_size: usize,

    /// Comma-separated concurrency levels
    #[arg(short, long, default_value = "10")]
    concurrency: String,

    /// Run the read benchmark
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    read: bool,

    /// Run the write benchmark
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    write: bool,

    /// Base RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: console or json
    #[arg(long, default_value = "console")]
    output_format: String,

    /// Output file path (writes to stdout if not specified)
    #[arg(long)]
    output_file: Option<String>,
}

fn parse_concurrency(spec: &str) -> anyhow::Result<Vec<usize>> {
    spec.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|e| anyhow::anyhow!("invalid concurrency level '{}': {}", s, e))
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let out_format: OutputFormat = cli
        .output_format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let concurrencies = parse_concurrency(&cli.concurrency)?;
    if concurrencies.is_empty() {
        anyhow::bail!("no concurrency levels specified");
    }
    if concurrencies.contains(&0) {
        anyhow::bail!("concurrency levels must be non-zero");
    }

    let config = WorkloadConfig {
        ops_per_worker: cli.blocks_per_task,
        key_space: cli.num_blocks,
        value_size: cli.block_size,
        seed: cli.seed,
    };

    if cli.memory {
        tracing::info!("using in-process memory store");
        run_benchmarks(
            MemoryStore::new(),
            "memory",
            config,
            &concurrencies,
            cli.write,
            cli.read,
            out_format,
            cli.output_file.as_deref(),
        )
        .await
    } else {
        tracing::info!("connecting to {}", cli.url);
        let client = RedisStore::new(&cli.url)?;
        run_benchmarks(
            client,
            "redis",
            config,
            &concurrencies,
            cli.write,
            cli.read,
            out_format,
            cli.output_file.as_deref(),
        )
        .await
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_benchmarks<C: KvStoreClient>(
    client: C,
    backend: &str,
    config: WorkloadConfig,
    concurrencies: &[usize],
    test_write: bool,
    test_read: bool,
    out_format: OutputFormat,
    output_file: Option<&str>,
) -> anyhow::Result<()> {
    let runner = LoadRunner::new(client, config);

    // Connectivity problems are fatal before any benchmarking starts.
    runner.smoke_test().await?;
    tracing::info!("smoke test passed: hello/world round trip ok");

    let mut all_results = Vec::new();

    if test_write {
        for &concurrency in concurrencies {
            let result = runner.run_write(concurrency).await?;
            tracing::info!(
                concurrency,
                "concurrent set completed {} iterations with rate {:.0} ops/sec byte rate {:.0} bytes/sec",
                result.completed,
                result.ops_per_sec(),
                result.bytes_per_sec()
            );
            all_results.push(format_run_result(&result, out_format, backend)?);
        }
    }

    if test_read {
        for &concurrency in concurrencies {
            let result = runner.run_read(concurrency).await?;
            tracing::info!(
                concurrency,
                "concurrent get completed {} iterations with rate {:.0} ops/sec byte rate {:.0} bytes/sec",
                result.completed,
                result.ops_per_sec(),
                result.bytes_per_sec()
            );
            all_results.push(format_run_result(&result, out_format, backend)?);
        }
    }

    if matches!(out_format, OutputFormat::Json) && !all_results.is_empty() {
        let combined = all_results.join("\n");
        write_output(&combined, output_file)?;
    }

    Ok(())
}
