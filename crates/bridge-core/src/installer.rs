//! Install/update orchestration.
//!
//! [`ExtensionInstaller`] is what the package manager talks to for packages
//! of type [`INSTALLER_TYPE`]. After the package manager has placed the
//! files, the installer points the CMS at the staging path, resolves the
//! manifest's element identity, prepares component paths, and lets the CMS
//! install or update the extension.
//!
//! Failures inside the CMS call are reported through the [`Reporter`] and
//! returned as [`Outcome::Failed`]; they are never raised. Callers that only
//! look at the `Result` therefore see success, which is what the package
//! manager expects from this installer.

use bridge_fs::{CmsPath, NormalizedPath};
use bridge_manifest::{ElementIdentity, ExtensionType, resolve};
use tracing::{debug, trace, warn};

use crate::environment::{Environment, PathConstant};
use crate::error::{Error, Result};
use crate::extman::{ExtmanSupport, NoopExtman, setup_extman_support};
use crate::host::{Application, ApplicationFactory, HostError, SOURCE_PATH_KEY};
use crate::messages::{AggregatedError, Operation};
use crate::package::{FilePlacer, PackageDescriptor};
use crate::report::{Reporter, TracingReporter};

/// Package type this installer handles.
pub const INSTALLER_TYPE: &str = "joomlatools-installer";

/// Whether packages of `package_type` belong to this installer.
pub fn supports(package_type: &str) -> bool {
    package_type == INSTALLER_TYPE
}

/// Staging path of a package: `tmp/<vendor>/<name>`.
///
/// Independent of configuration; the CMS resolves it against its own root.
pub fn install_path(package: &dyn PackageDescriptor) -> NormalizedPath {
    NormalizedPath::new(CmsPath::Staging.as_str()).join(package.pretty_name())
}

/// Where the installer is in a package's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Bootstrapped,
    Installing,
    Updating,
    Checking,
    Settled,
}

/// A failure inside the guarded CMS call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InstallError {
    /// The CMS returned `false`
    #[error(transparent)]
    Rejected(#[from] AggregatedError),

    /// The CMS raised an error
    #[error(transparent)]
    Host(#[from] HostError),
}

impl InstallError {
    /// Location detail supplied by the CMS, if any.
    pub fn origin(&self) -> Option<&str> {
        match self {
            Self::Rejected(_) => None,
            Self::Host(e) => e.origin.as_deref(),
        }
    }
}

/// Result of an install or update that got past file placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// Already reported; carried for callers that want to act on it
    Failed(InstallError),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn error(&self) -> Option<&InstallError> {
        match self {
            Self::Completed => None,
            Self::Failed(e) => Some(e),
        }
    }
}

/// Package-manager-facing installer for CMS extensions.
pub struct ExtensionInstaller<'env, F: ApplicationFactory, P: FilePlacer> {
    env: &'env mut Environment<F>,
    placer: P,
    extman: Box<dyn ExtmanSupport>,
    reporter: Box<dyn Reporter>,
    state: LifecycleState,
}

impl<'env, F: ApplicationFactory, P: FilePlacer> ExtensionInstaller<'env, F, P> {
    /// Create an installer over a process environment.
    ///
    /// The environment is bootstrapped lazily on the first lifecycle call.
    pub fn new(env: &'env mut Environment<F>, placer: P) -> Self {
        let state = if env.is_bootstrapped() {
            LifecycleState::Bootstrapped
        } else {
            LifecycleState::Uninitialized
        };
        Self {
            env,
            placer,
            extman: Box::new(NoopExtman),
            reporter: Box::new(TracingReporter),
            state,
        }
    }

    pub fn with_extman(mut self, extman: impl ExtmanSupport + 'static) -> Self {
        self.extman = Box::new(extman);
        self
    }

    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn environment(&self) -> &Environment<F> {
        &*self.env
    }

    pub fn supports(&self, package_type: &str) -> bool {
        supports(package_type)
    }

    pub fn install_path(&self, package: &dyn PackageDescriptor) -> NormalizedPath {
        install_path(package)
    }

    /// Bootstrap the environment if that has not happened yet.
    pub fn bootstrap(&mut self) -> Result<()> {
        self.env.bootstrap()?;
        if self.state == LifecycleState::Uninitialized {
            self.transition(LifecycleState::Bootstrapped);
        }
        Ok(())
    }

    /// Place the package's files, then install it into the CMS.
    ///
    /// Only bootstrap and file-placement failures are returned as errors.
    pub fn install(
        &mut self,
        repo: &mut P::Repository,
        package: &dyn PackageDescriptor,
    ) -> Result<Outcome> {
        self.bootstrap()?;
        self.placer
            .install(repo, package)
            .map_err(|e| Error::Placement {
                package: package.pretty_name().to_string(),
                message: e.to_string(),
            })?;
        self.run(Operation::Install, package)
    }

    /// Place the target's files, then update the extension in the CMS.
    pub fn update(
        &mut self,
        repo: &mut P::Repository,
        initial: &dyn PackageDescriptor,
        target: &dyn PackageDescriptor,
    ) -> Result<Outcome> {
        self.bootstrap()?;
        self.placer
            .update(repo, initial, target)
            .map_err(|e| Error::Placement {
                package: target.pretty_name().to_string(),
                message: e.to_string(),
            })?;
        self.run(Operation::Update, target)
    }

    /// Whether the CMS already knows the extension staged for `package`.
    ///
    /// A missing or unloadable manifest, or one whose element cannot be
    /// resolved, means "not installed".
    pub fn is_installed(
        &mut self,
        _repo: &P::Repository,
        package: &dyn PackageDescriptor,
    ) -> Result<bool> {
        self.bootstrap()?;
        self.transition(LifecycleState::Checking);
        let result = self.check_installed(package);
        self.transition(LifecycleState::Settled);
        result
    }

    fn check_installed(&mut self, package: &dyn PackageDescriptor) -> Result<bool> {
        let path = install_path(package);
        let identity = match self.load_identity(&path) {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                debug!(%path, "no manifest found; treating as not installed");
                return Ok(false);
            }
            Err(Error::ManifestLoad { source, .. }) => {
                debug!(%path, error = %source, "manifest failed to load; treating as not installed");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        if !identity.is_resolved() {
            debug!(%path, kind = %identity.kind, "element could not be resolved");
            return Ok(false);
        }

        let application = self.env.application_mut()?;
        application
            .has_extension(&identity.element, identity.kind)
            .map_err(|source| Error::Query {
                element: identity.element.clone(),
                source,
            })
    }

    fn run(&mut self, operation: Operation, package: &dyn PackageDescriptor) -> Result<Outcome> {
        self.transition(match operation {
            Operation::Install => LifecycleState::Installing,
            Operation::Update => LifecycleState::Updating,
        });
        let result = self.run_operation(operation, package);
        self.transition(LifecycleState::Settled);
        result
    }

    fn run_operation(
        &mut self,
        operation: Operation,
        package: &dyn PackageDescriptor,
    ) -> Result<Outcome> {
        setup_extman_support(self.extman.as_mut(), package);
        self.reporter
            .operation_started(operation, package.pretty_name());

        let path = install_path(package);
        self.prepare_component_paths(&path)?;

        let application = self.env.application_mut()?;
        Ok(
            match execute(application, operation, &path, package.pretty_name()) {
                Ok(()) => Outcome::Completed,
                Err(e) => {
                    self.reporter.operation_failed(package.pretty_name(), &e);
                    Outcome::Failed(e)
                }
            },
        )
    }

    /// Define the component path constants when the staged extension is a
    /// component. Manifest problems only skip this step.
    fn prepare_component_paths(&mut self, path: &NormalizedPath) -> Result<()> {
        let identity = match self.load_identity(path) {
            Ok(Some(identity)) => identity,
            Ok(None) => return Ok(()),
            Err(Error::ManifestLoad { source, .. }) => {
                warn!(%path, error = %source, "manifest failed to load; skipping component paths");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if identity.kind == ExtensionType::Component {
            self.define_component_paths(&identity.element);
        }
        Ok(())
    }

    fn define_component_paths(&mut self, element: &str) {
        const LAYOUT: [(PathConstant, PathConstant); 3] = [
            (PathConstant::Component, PathConstant::Base),
            (PathConstant::ComponentSite, PathConstant::Site),
            (PathConstant::ComponentAdministrator, PathConstant::Administrator),
        ];

        let paths = self.env.paths_mut();
        for (constant, root) in LAYOUT {
            if let Some(root) = paths.get(root).cloned() {
                paths.define(constant, root.join(CmsPath::Components).join(element));
            }
        }
    }

    fn load_identity(&mut self, path: &NormalizedPath) -> Result<Option<ElementIdentity>> {
        let installer = self.env.application_mut()?.installer();
        installer.set_path(SOURCE_PATH_KEY, path);
        let manifest = installer.manifest().map_err(|source| Error::ManifestLoad {
            path: path.clone(),
            source,
        })?;
        Ok(manifest.map(resolve))
    }

    fn transition(&mut self, next: LifecycleState) {
        trace!(from = ?self.state, to = ?next, "lifecycle transition");
        self.state = next;
    }
}

fn execute<A: Application>(
    application: &mut A,
    operation: Operation,
    path: &NormalizedPath,
    package: &str,
) -> std::result::Result<(), InstallError> {
    let accepted = match operation {
        Operation::Install => application.install(path)?,
        Operation::Update => application.update(path)?,
    };

    if !accepted {
        return Err(AggregatedError::from_queue(operation, package, application.message_queue()).into());
    }

    debug!(package, %operation, "CMS accepted extension");
    Ok(())
}
