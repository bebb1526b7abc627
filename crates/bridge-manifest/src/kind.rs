//! Extension types understood by the target platform.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The type of an extension as declared by its manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionType {
    /// Full application component; the fallback for unknown types.
    #[default]
    Component,
    Module,
    Plugin,
    Template,
}

impl ExtensionType {
    /// Interpret a manifest `type` attribute.
    ///
    /// Only the exact lowercase names are recognized. Anything else, including
    /// `"Module"` or `" plugin "`, falls back to [`ExtensionType::Component`].
    pub fn from_manifest_attr(value: Option<&str>) -> Self {
        match value {
            Some("module") => Self::Module,
            Some("plugin") => Self::Plugin,
            Some("template") => Self::Template,
            _ => Self::Component,
        }
    }

    /// Name of the file-entry attribute that carries the element for this
    /// type, if the element is taken from the `files` section.
    pub fn element_attribute(&self) -> Option<&'static str> {
        match self {
            Self::Module => Some("module"),
            Self::Plugin => Some("plugin"),
            Self::Component | Self::Template => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Module => "module",
            Self::Plugin => "plugin",
            Self::Template => "template",
        }
    }
}

impl FromStr for ExtensionType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "component" => Ok(Self::Component),
            "module" => Ok(Self::Module),
            "plugin" => Ok(Self::Plugin),
            "template" => Ok(Self::Template),
            _ => Err(Error::UnknownType(s.to_string())),
        }
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
