//! Error types for bridge-core

use bridge_fs::NormalizedPath;

use crate::host::HostError;

/// Result type for bridge-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that cross back into the package manager.
///
/// Failures of the guarded install/update section are not represented here;
/// they are reported and returned as [`Outcome::Failed`](crate::Outcome).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The application handle was requested before bootstrap
    #[error("CMS application has not been bootstrapped")]
    NotBootstrapped,

    /// Creating or authenticating the application failed
    #[error("Failed to bootstrap CMS application: {0}")]
    Bootstrap(#[source] HostError),

    /// The package manager's own file placement failed
    #[error("Failed to place files for {package}: {message}")]
    Placement { package: String, message: String },

    /// The manifest at the staging path could not be loaded
    #[error("Failed to load manifest from {path}: {source}")]
    ManifestLoad {
        path: NormalizedPath,
        #[source]
        source: HostError,
    },

    /// Asking the application about an installed extension failed
    #[error("Failed to query extension {element}: {source}")]
    Query {
        element: String,
        #[source]
        source: HostError,
    },

    /// Closing the application session failed
    #[error("Failed to close CMS session: {0}")]
    Session(#[source] HostError),

    /// Settings block has the wrong shape
    #[error("Invalid bridge settings: {message}")]
    Settings { message: String },

    /// Filesystem error from bridge-fs
    #[error(transparent)]
    Fs(#[from] bridge_fs::Error),
}
