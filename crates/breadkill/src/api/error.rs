use thiserror::Error;

/// Failures surfaced at the process boundary.
///
/// The simulation itself never fails once constructed; these cover loading
/// configuration and parsing command-line arguments.
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
