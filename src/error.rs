use thiserror::Error;

/// Unified error type for auto-version operations
#[derive(Error, Debug)]
pub enum AutoVersionError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid version: {0}")]
    Version(String),

    #[error("Version increment failed: {0}")]
    Increment(String),

    #[error("Version source error: {0}")]
    Manifest(String),

    #[error("Repository state error: {0}")]
    Repository(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("Hook failed: {0}")]
    Hook(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in auto-version
pub type Result<T> = std::result::Result<T, AutoVersionError>;

impl AutoVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AutoVersionError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        AutoVersionError::Version(msg.into())
    }

    /// Create an increment error with context
    pub fn increment(msg: impl Into<String>) -> Self {
        AutoVersionError::Increment(msg.into())
    }

    /// Create a version-source error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        AutoVersionError::Manifest(msg.into())
    }

    /// Create a repository-state error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        AutoVersionError::Repository(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        AutoVersionError::Branch(msg.into())
    }

    /// Create a hook error with context
    pub fn hook(msg: impl Into<String>) -> Self {
        AutoVersionError::Hook(msg.into())
    }
}
