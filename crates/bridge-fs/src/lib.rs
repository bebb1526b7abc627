//! Filesystem helpers for the extension bridge
//!
//! Provides forward-slash path values, the well-known directory names of the
//! target CMS, and format-agnostic settings loading.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::CmsPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
