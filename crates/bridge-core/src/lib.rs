//! Core orchestration layer for the extension bridge
//!
//! A package manager hands packages of the installer type to
//! [`ExtensionInstaller`], which redirects them into the extension lifecycle
//! of the target CMS:
//!
//! - **Environment**: once-per-process bootstrap of the CMS application
//!   (base paths, authenticated service user, session teardown)
//! - **Orchestration**: install, update and presence checks keyed by the
//!   manifest's element identity
//! - **Message aggregation**: turning the CMS flash-message queue into one
//!   diagnostic per failed operation
//!
//! # Architecture
//!
//! ```text
//!              package manager
//!                     |
//!               bridge-core  ----->  CMS application (host traits)
//!                     |
//!          +----------+----------+
//!          |                     |
//!     bridge-fs           bridge-manifest
//! ```

pub mod environment;
pub mod error;
pub mod extman;
pub mod host;
pub mod installer;
pub mod messages;
pub mod package;
pub mod report;
pub mod settings;

pub use environment::{Environment, PathConstant, PathRegistry};
pub use error::{Error, Result};
pub use extman::{ExtmanSupport, NoopExtman, requires_extman, setup_extman_support};
pub use host::{
    Application, ApplicationFactory, ApplicationOptions, HostError, HostResult,
    ManifestInstaller, QueuedMessage, RequestContext,
};
pub use installer::{
    ExtensionInstaller, INSTALLER_TYPE, InstallError, LifecycleState, Outcome, install_path,
    supports,
};
pub use messages::{AggregatedError, Operation, collect_error_messages};
pub use package::{FilePlacer, Package, PackageDescriptor};
pub use report::{Reporter, TracingReporter, render_failure};
pub use settings::{BridgeSettings, Credentials, SETTINGS_KEY, Verbosity};
