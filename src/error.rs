use thiserror::Error;

/// Unified error type for gitversion operations
#[derive(Error, Debug)]
pub enum GitVersionError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Parse(String),

    #[error("no valid version tags found")]
    NoVersionTags,

    #[error("Commit lookup failed: {0}")]
    CommitLookup(String),

    #[error("unknown field type: {0}")]
    UnknownField(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gitversion
pub type Result<T> = std::result::Result<T, GitVersionError>;

impl GitVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitVersionError::Config(msg.into())
    }

    /// Create a version parsing error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        GitVersionError::Parse(msg.into())
    }

    /// Create a commit lookup error with context
    pub fn commit_lookup(msg: impl Into<String>) -> Self {
        GitVersionError::CommitLookup(msg.into())
    }

    /// Create an unknown field error for the offending value
    pub fn unknown_field(field: impl Into<String>) -> Self {
        GitVersionError::UnknownField(field.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        GitVersionError::Tag(msg.into())
    }
}
