//! Element identity resolution.
//!
//! The element is the short, lowercase token the target platform stores in
//! its extension table. How it is derived depends on the extension type:
//!
//! | type        | source                                             |
//! |-------------|----------------------------------------------------|
//! | `module`    | first file entry with a non-empty `module` attr    |
//! | `plugin`    | first file entry with a non-empty `plugin` attr    |
//! | `template`  | the manifest name                                  |
//! | `component` | the manifest name, prefixed with `com_`            |
//!
//! Resolution never fails. An empty element means "could not resolve".

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::kind::ExtensionType;
use crate::manifest::Manifest;

/// Prefix every component element carries.
pub const COMPONENT_PREFIX: &str = "com_";

static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").unwrap());

/// The `(type, element)` pair the platform addresses an extension by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementIdentity {
    pub kind: ExtensionType,
    /// Normalized element, or empty when resolution failed.
    pub element: String,
}

impl ElementIdentity {
    pub fn new(kind: ExtensionType, element: impl Into<String>) -> Self {
        Self {
            kind,
            element: element.into(),
        }
    }

    /// Whether an element could be derived.
    pub fn is_resolved(&self) -> bool {
        !self.element.is_empty()
    }
}

impl fmt::Display for ElementIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.element)
    }
}

/// Lowercase `raw` and drop every character outside `[A-Za-z0-9_.-]`.
pub fn normalize_element(raw: &str) -> String {
    let lowered = raw.to_ascii_lowercase();
    DISALLOWED_CHARS.replace_all(&lowered, "").into_owned()
}

/// Derive the element identity of a loaded manifest.
pub fn resolve(manifest: &Manifest) -> ElementIdentity {
    let kind = manifest.extension_type();

    let element = match kind.element_attribute() {
        Some(attribute) => manifest
            .files
            .iter()
            .filter_map(|entry| entry.attribute(attribute))
            .find(|value| !value.is_empty())
            .map(normalize_element)
            .unwrap_or_default(),
        None => {
            let element = normalize_element(&manifest.name);
            if kind == ExtensionType::Component && !element.starts_with(COMPONENT_PREFIX) {
                format!("{COMPONENT_PREFIX}{element}")
            } else {
                element
            }
        }
    };

    tracing::trace!(kind = %kind, element = %element, "resolved manifest element");
    ElementIdentity { kind, element }
}
