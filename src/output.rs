//! Output formatting for benchmark results - console summaries or JSON for
//! CI and data analysis.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::bench::AggregateResult;
use crate::error::{BenchError, Result};

/// Supported output formats
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Console,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// JSON-serializable run result wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRunResult {
    pub metadata: ResultMetadata,
    pub run: AggregateResult,
    pub throughput: ThroughputData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub timestamp: String,
    pub backend: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThroughputData {
    pub ops_per_sec: f64,
    pub bytes_per_sec: f64,
}

impl JsonRunResult {
    pub fn from_result(result: &AggregateResult, backend: &str) -> Self {
        JsonRunResult {
            metadata: ResultMetadata {
                timestamp: Utc::now().to_rfc3339(),
                backend: backend.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            run: result.clone(),
            throughput: ThroughputData {
                ops_per_sec: result.ops_per_sec(),
                bytes_per_sec: result.bytes_per_sec(),
            },
        }
    }
}

/// Format a run result for output
pub fn format_run_result(
    result: &AggregateResult,
    format: OutputFormat,
    backend: &str,
) -> Result<String> {
    match format {
        OutputFormat::Console => {
            result.print_summary();
            Ok(String::new())
        }
        OutputFormat::Json => {
            let json_result = JsonRunResult::from_result(result, backend);
            serde_json::to_string_pretty(&json_result)
                .map_err(|e| BenchError::Serialization(e.to_string()))
        }
    }
}

/// Write output to stdout or file
pub fn write_output(content: &str, output_file: Option<&str>) -> Result<()> {
    if let Some(path) = output_file {
        std::fs::write(path, content).map_err(BenchError::Io)?;
        println!("Output written to {}", path);
    } else if !content.is_empty() {
        println!("{}", content);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::WorkerResult;

    fn sample_result() -> AggregateResult {
        let workers = [
            WorkerResult {
                completed: 100,
                bytes: 1600,
            },
            WorkerResult {
                completed: 100,
                bytes: 1600,
            },
        ];
        AggregateResult::from_workers("SET", 100, 2, &workers, 0.5)
    }

    #[test]
    fn output_format_parses_case_insensitively() {
        use std::str::FromStr;

        assert!(matches!(OutputFormat::from_str("console"), Ok(OutputFormat::Console)));
        assert!(matches!(OutputFormat::from_str("json"), Ok(OutputFormat::Json)));
        assert!(matches!(OutputFormat::from_str("JSON"), Ok(OutputFormat::Json)));
        assert!(OutputFormat::from_str("invalid").is_err());
    }

    #[test]
    fn json_result_round_trips() {
        let json = format_run_result(&sample_result(), OutputFormat::Json, "memory").unwrap();
        let parsed: JsonRunResult = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.metadata.backend, "memory");
        assert_eq!(parsed.run.completed, 200);
        assert_eq!(parsed.run.bytes, 3200);
        assert_eq!(parsed.throughput.ops_per_sec, 400.0);
        assert_eq!(parsed.throughput.bytes_per_sec, 6400.0);
    }

    #[test]
    fn console_format_produces_no_string_output() {
        let out = format_run_result(&sample_result(), OutputFormat::Console, "memory").unwrap();
        assert!(out.is_empty());
    }
}
