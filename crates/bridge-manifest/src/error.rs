use std::path::PathBuf;

/// Errors that can occur while loading manifests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Manifest file not found at the expected path.
    #[error("extension manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// Unknown extension type given where a strict value is required.
    #[error("unknown extension type '{0}' (expected component, module, plugin or template)")]
    UnknownType(String),

    /// Failed to parse a TOML manifest.
    #[error("failed to parse extension manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    /// Failed to parse a JSON manifest.
    #[error("failed to parse extension manifest: {0}")]
    ManifestJson(#[from] serde_json::Error),

    /// Error loading the manifest file.
    #[error(transparent)]
    Fs(#[from] bridge_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
