//! The subset of an extension manifest the bridge reads.
//!
//! The target platform owns manifest parsing; the bridge only needs the
//! declared type, the display name, and the ordered `files` section. The
//! model is serde-friendly so fixtures and snapshots can be stored as TOML
//! or JSON.
//!
//! # Example TOML
//!
//! ```toml
//! type = "module"
//! name = "Login"
//!
//! [[files]]
//! path = "tmpl"
//!
//! [[files]]
//! path = "mod_login.php"
//! module = "mod_login"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use bridge_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::kind::ExtensionType;

/// A loaded extension manifest. Never mutated once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Manifest {
    /// Raw `type` attribute, as written in the manifest.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_attr: Option<String>,
    /// Free-text display name.
    #[serde(default)]
    pub name: String,
    /// File entries in document order.
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// One entry of the manifest `files` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileEntry {
    /// Text content of the entry (file or folder name).
    #[serde(default)]
    pub path: String,
    /// Remaining attributes, e.g. `module = "mod_login"`.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

impl FileEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

impl Manifest {
    pub fn new(type_attr: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            type_attr: type_attr.map(str::to_string),
            name: name.into(),
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, entry: FileEntry) -> Self {
        self.files.push(entry);
        self
    }

    /// The declared extension type, falling back to component.
    pub fn extension_type(&self) -> ExtensionType {
        ExtensionType::from_manifest_attr(self.type_attr.as_deref())
    }

    /// Parse a manifest from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a manifest from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a manifest from a `.toml` or `.json` file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ManifestNotFound(path.to_path_buf()));
        }
        let manifest = ConfigStore::new().load(&NormalizedPath::new(path))?;
        Ok(manifest)
    }
}
