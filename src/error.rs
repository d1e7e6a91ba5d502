use thiserror::Error;

/// Errors surfaced by store adapters. Whatever retry/commit logic the store
/// client runs internally, the harness only ever sees one of these.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("operation error: {0}")]
    Operation(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("client error: {0}")]
    Client(#[from] ClientError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("smoke test failed: {0}")]
    SmokeTest(String),
    #[error("task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, BenchError>;
pub type ClientResult<T> = std::result::Result<T, ClientError>;
