//! Error types for bridge-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from bridge-core
    #[error(transparent)]
    Core(#[from] bridge_core::Error),

    /// Error from bridge-manifest
    #[error(transparent)]
    Manifest(#[from] bridge_manifest::Error),

    /// Error from bridge-fs
    #[error(transparent)]
    Fs(#[from] bridge_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
