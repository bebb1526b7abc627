//! Shared test utilities for the extension-bridge workspace.
//!
//! Fakes for the collaborators the bridge talks to. It is a dev-dependency
//! only, never published.
//!
//! # Modules
//!
//! - [`app`]: in-memory CMS application and its factory
//! - [`pm`]: package-manager side (file placement, repository)
//! - [`record`]: recording reporter and extman capability

pub mod app;
pub mod pm;
pub mod record;

pub use app::{FakeApplication, FakeFactory, HostCall, Response};
pub use pm::{FakePlacer, FakeRepository, PlacementError};
pub use record::{RecordingExtman, RecordingReporter, ReportEvent};
