//! Extension manifests and element identity resolution.
//!
//! The target CMS addresses every installed extension by a `(type, element)`
//! pair. This crate models the parts of an extension manifest that pair is
//! derived from and implements the per-type derivation rules.

pub mod error;
pub mod kind;
pub mod manifest;
pub mod resolver;

pub use error::{Error, Result};
pub use kind::ExtensionType;
pub use manifest::{FileEntry, Manifest};
pub use resolver::{COMPONENT_PREFIX, ElementIdentity, normalize_element, resolve};
