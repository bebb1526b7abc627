//! Contracts of the target CMS application.
//!
//! The bridge never parses manifests or writes extension tables itself. It
//! drives an [`Application`] created by an [`ApplicationFactory`] during
//! bootstrap and reads manifests through the application's
//! [`ManifestInstaller`].

use std::fmt;

use bridge_fs::NormalizedPath;
use bridge_manifest::{ExtensionType, Manifest};
use serde::{Deserialize, Serialize};

use crate::settings::{Credentials, Verbosity};

/// Path key under which the staged package is handed to the installer.
pub const SOURCE_PATH_KEY: &str = "source";

/// Result type for calls into the application
pub type HostResult<T> = std::result::Result<T, HostError>;

/// A failure raised by the application.
///
/// `origin` carries whatever location detail the application can offer
/// (typically `file:line` of the failing code).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
    pub origin: Option<String>,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// One entry of the application's flash-message queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedMessage {
    /// Message category, e.g. `error`, `warning`, `message`
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl QueuedMessage {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("error", message)
    }
}

/// Request context the application expects to run under.
///
/// The bridge runs from a terminal, so it impersonates a local request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub host: String,
    pub user_agent: String,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            user_agent: "Composer".to_string(),
        }
    }
}

/// Options the application is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationOptions {
    /// Username treated as the root user
    pub root_user: String,
    pub log_level: Verbosity,
    pub request: RequestContext,
    /// Site root, as registered during bootstrap
    pub base_path: NormalizedPath,
}

/// Manifest-loading side of the application's installer.
pub trait ManifestInstaller {
    /// Point the installer at a directory, e.g. `("source", "tmp/vendor/pkg")`.
    fn set_path(&mut self, key: &str, path: &NormalizedPath);

    /// Load the manifest found at the `source` path.
    ///
    /// `Ok(None)` means no manifest was found.
    fn manifest(&self) -> HostResult<Option<&Manifest>>;
}

/// A live, authenticated session with the CMS.
pub trait Application {
    fn authenticate(&mut self, credentials: &Credentials) -> HostResult<()>;

    /// Install the extension staged at `path`; `false` means rejected.
    fn install(&mut self, path: &NormalizedPath) -> HostResult<bool>;

    /// Update the extension staged at `path`; `false` means rejected.
    fn update(&mut self, path: &NormalizedPath) -> HostResult<bool>;

    fn has_extension(&self, element: &str, kind: ExtensionType) -> HostResult<bool>;

    fn installer(&mut self) -> &mut dyn ManifestInstaller;

    /// Messages enqueued since the session started.
    fn message_queue(&self) -> &[QueuedMessage];

    /// Close the shared session before the process tears down.
    fn close_session(&mut self) -> HostResult<()>;
}

/// Creates the application during bootstrap.
pub trait ApplicationFactory {
    type Application: Application;

    fn create(&mut self, options: &ApplicationOptions) -> HostResult<Self::Application>;
}

impl fmt::Display for QueuedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}
