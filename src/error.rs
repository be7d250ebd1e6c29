use thiserror::Error;

/// Unified error type for git-versioner operations
///
/// "No tags" and "no common ancestor" are not represented here: both have
/// deterministic fallbacks inside the resolver.
#[derive(Error, Debug)]
pub enum VersionerError {
    #[error("Repository unavailable: {0}")]
    RepositoryUnavailable(String),

    #[error("Graph traversal failed: {0}")]
    GraphTraversal(String),

    #[error("Reference not found: {0}")]
    ReferenceNotFound(String),

    #[error("Failed to write version output: {0}")]
    OutputWrite(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-versioner
pub type Result<T> = std::result::Result<T, VersionerError>;

impl VersionerError {
    /// The repository store cannot be opened or queried
    pub fn unavailable(msg: impl Into<String>) -> Self {
        VersionerError::RepositoryUnavailable(msg.into())
    }

    /// A commit, tag or ref could not be read mid-walk
    pub fn traversal(msg: impl Into<String>) -> Self {
        VersionerError::GraphTraversal(msg.into())
    }

    /// A named reference was explicitly requested and does not exist
    pub fn not_found(msg: impl Into<String>) -> Self {
        VersionerError::ReferenceNotFound(msg.into())
    }

    /// Create an output writer error with context
    pub fn output(msg: impl Into<String>) -> Self {
        VersionerError::OutputWrite(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionerError::Config(msg.into())
    }
}
