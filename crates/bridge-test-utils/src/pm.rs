//! Package-manager side fakes.

use bridge_core::{FilePlacer, PackageDescriptor};

/// Placement failure raised by [`FakePlacer`].
#[derive(Debug, thiserror::Error)]
#[error("could not extract archive for {0}")]
pub struct PlacementError(pub String);

/// Installed-package repository: the pretty names placed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeRepository {
    pub packages: Vec<String>,
}

/// File placement that only records into the repository.
#[derive(Debug, Clone, Default)]
pub struct FakePlacer {
    fail: bool,
}

impl FakePlacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A placer whose every call fails.
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

impl FilePlacer for FakePlacer {
    type Repository = FakeRepository;
    type Error = PlacementError;

    fn install(
        &mut self,
        repo: &mut FakeRepository,
        package: &dyn PackageDescriptor,
    ) -> Result<(), PlacementError> {
        if self.fail {
            return Err(PlacementError(package.pretty_name().to_string()));
        }
        repo.packages.push(package.pretty_name().to_string());
        Ok(())
    }

    fn update(
        &mut self,
        repo: &mut FakeRepository,
        initial: &dyn PackageDescriptor,
        target: &dyn PackageDescriptor,
    ) -> Result<(), PlacementError> {
        if self.fail {
            return Err(PlacementError(target.pretty_name().to_string()));
        }
        repo.packages.retain(|p| p != initial.pretty_name());
        repo.packages.push(target.pretty_name().to_string());
        Ok(())
    }
}
