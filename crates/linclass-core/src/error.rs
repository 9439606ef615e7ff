//! Error types for linclass

/// Result type alias using linclass's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for linclass operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input width or constant shapes disagree
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Where the mismatch was detected
        context: String,
        /// Size the operator requires
        expected: usize,
        /// Size it was given
        actual: usize,
    },

    /// Operator option that is not implemented
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors while reading configuration
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new dimension mismatch error
    pub fn dimension_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Create a new unsupported-operation error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this is a dimension mismatch
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. })
    }
}
