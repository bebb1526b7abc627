//! What the bridge sees of the package manager.

use std::fmt;

/// A package as handed over by the package manager.
///
/// The bridge only ever reads the pretty name (`vendor/name`).
pub trait PackageDescriptor {
    fn pretty_name(&self) -> &str;
}

/// Plain package descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Package {
    pretty_name: String,
}

impl Package {
    pub fn new(pretty_name: impl Into<String>) -> Self {
        Self {
            pretty_name: pretty_name.into(),
        }
    }

    /// The part before the first `/`.
    pub fn vendor(&self) -> &str {
        self.pretty_name
            .split_once('/')
            .map_or(self.pretty_name.as_str(), |(vendor, _)| vendor)
    }

    /// The part after the first `/`, if any.
    pub fn name(&self) -> Option<&str> {
        self.pretty_name.split_once('/').map(|(_, name)| name)
    }
}

impl PackageDescriptor for Package {
    fn pretty_name(&self) -> &str {
        &self.pretty_name
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_name)
    }
}

/// The package manager's own file placement primitive.
///
/// Runs before the CMS sees the package: it downloads and extracts the
/// archive into the install path. Its failures propagate to the caller.
pub trait FilePlacer {
    /// The package manager's installed-package repository.
    type Repository: ?Sized;
    type Error: std::error::Error;

    fn install(
        &mut self,
        repo: &mut Self::Repository,
        package: &dyn PackageDescriptor,
    ) -> Result<(), Self::Error>;

    fn update(
        &mut self,
        repo: &mut Self::Repository,
        initial: &dyn PackageDescriptor,
        target: &dyn PackageDescriptor,
    ) -> Result<(), Self::Error>;
}
