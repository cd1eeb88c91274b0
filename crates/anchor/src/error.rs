use thiserror::Error;

/// Result type for anchoring operations
pub type Result<T> = std::result::Result<T, AnchorError>;

/// Errors that can occur while creating anchors or loading configuration.
///
/// Relocation itself never fails: an anchor that cannot be found is reported
/// through [`crate::RelocationResult`], not through this type.
#[derive(Error, Debug)]
pub enum AnchorError {
    /// Line numbers are 1-indexed
    #[error("Invalid line: lines are 1-indexed, got 0")]
    InvalidLine,

    /// Span whose end precedes its start
    #[error("Invalid span: end_line={end_line} is before line={line}")]
    InvalidSpan { line: usize, end_line: usize },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// IO error while reading a configuration file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AnchorError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid span error
    pub const fn invalid_span(line: usize, end_line: usize) -> Self {
        Self::InvalidSpan { line, end_line }
    }
}
