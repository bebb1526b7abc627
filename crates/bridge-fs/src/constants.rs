//! Well-known directory names of the target CMS installation.

use std::path::Path;

/// Directories the bridge addresses relative to a site root or staging area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmsPath {
    /// The `tmp` directory the package manager stages extensions into
    Staging,
    /// The `components` directory (per application)
    Components,
    /// The `administrator` application root
    Administrator,
    /// The `libraries` directory holding the platform framework
    Libraries,
    /// The `includes` directory holding bootstrap scripts
    Includes,
}

impl CmsPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staging => "tmp",
            Self::Components => "components",
            Self::Administrator => "administrator",
            Self::Libraries => "libraries",
            Self::Includes => "includes",
        }
    }
}

impl AsRef<Path> for CmsPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for CmsPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for CmsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
