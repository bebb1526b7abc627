//! Process-wide CMS environment.
//!
//! The CMS keeps its bootstrap state (base paths, authenticated session,
//! define-once path constants) for the lifetime of the process. The
//! [`Environment`] owns that state explicitly: it is created once per
//! package-manager run and handed by reference to the installer.

use std::collections::BTreeMap;
use std::fmt;

use bridge_fs::{CmsPath, NormalizedPath};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::host::{Application, ApplicationFactory, ApplicationOptions, RequestContext};
use crate::settings::{BridgeSettings, Credentials, Verbosity};

/// Path constants the CMS expects to be defined before installing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathConstant {
    Base,
    Site,
    Administrator,
    Libraries,
    Component,
    ComponentSite,
    ComponentAdministrator,
}

impl PathConstant {
    /// Name of the constant on the CMS side.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Base => "JPATH_BASE",
            Self::Site => "JPATH_SITE",
            Self::Administrator => "JPATH_ADMINISTRATOR",
            Self::Libraries => "JPATH_LIBRARIES",
            Self::Component => "JPATH_COMPONENT",
            Self::ComponentSite => "JPATH_COMPONENT_SITE",
            Self::ComponentAdministrator => "JPATH_COMPONENT_ADMINISTRATOR",
        }
    }
}

impl fmt::Display for PathConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Define-once registry of path constants.
///
/// Redefining a constant keeps the first value.
#[derive(Debug, Clone, Default)]
pub struct PathRegistry {
    values: BTreeMap<PathConstant, NormalizedPath>,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` unless `constant` is already defined.
    ///
    /// Returns `true` if the value was registered.
    pub fn define(&mut self, constant: PathConstant, value: NormalizedPath) -> bool {
        if self.values.contains_key(&constant) {
            debug!(%constant, "path constant already defined");
            return false;
        }
        debug!(%constant, path = %value, "defining path constant");
        self.values.insert(constant, value);
        true
    }

    pub fn get(&self, constant: PathConstant) -> Option<&NormalizedPath> {
        self.values.get(&constant)
    }

    pub fn is_defined(&self, constant: PathConstant) -> bool {
        self.values.contains_key(&constant)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PathConstant, &NormalizedPath)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Bootstrap state of the CMS for one process.
pub struct Environment<F: ApplicationFactory> {
    factory: F,
    settings: BridgeSettings,
    credentials: Credentials,
    verbosity: Verbosity,
    working_dir: NormalizedPath,
    request: RequestContext,
    paths: PathRegistry,
    application: Option<F::Application>,
    initialized: bool,
    session_closed: bool,
}

impl<F: ApplicationFactory> Environment<F> {
    /// Create an environment rooted at `working_dir`.
    ///
    /// Nothing is bootstrapped until [`bootstrap`](Self::bootstrap) runs.
    pub fn new(
        factory: F,
        settings: BridgeSettings,
        verbosity: Verbosity,
        working_dir: impl Into<NormalizedPath>,
    ) -> Self {
        let credentials = settings.credentials();
        Self {
            factory,
            settings,
            credentials,
            verbosity,
            working_dir: working_dir.into(),
            request: RequestContext::default(),
            paths: PathRegistry::new(),
            application: None,
            initialized: false,
            session_closed: false,
        }
    }

    pub fn with_request_context(mut self, request: RequestContext) -> Self {
        self.request = request;
        self
    }

    /// Site root: the working directory, plus `basedir` when configured.
    pub fn base_path(&self) -> NormalizedPath {
        self.settings.base_path(&self.working_dir)
    }

    /// Establish the CMS context and the authenticated application.
    ///
    /// Idempotent: the base paths are registered once, and an existing
    /// application handle is never replaced.
    pub fn bootstrap(&mut self) -> Result<()> {
        if !self.initialized {
            let base = self.base_path();
            self.paths.define(PathConstant::Base, base.clone());
            self.paths.define(PathConstant::Site, base.clone());
            self.paths
                .define(PathConstant::Administrator, base.join(CmsPath::Administrator));
            self.paths
                .define(PathConstant::Libraries, base.join(CmsPath::Libraries));
            self.initialized = true;
            info!(base = %base, "bootstrapped CMS environment");
        }

        if self.application.is_none() {
            let options = ApplicationOptions {
                root_user: self.credentials.username.clone(),
                log_level: self.verbosity,
                request: self.request.clone(),
                base_path: self.base_path(),
            };
            let mut application = self.factory.create(&options).map_err(Error::Bootstrap)?;
            application
                .authenticate(&self.credentials)
                .map_err(Error::Bootstrap)?;
            debug!(user = %self.credentials.username, "authenticated CMS application");
            self.application = Some(application);
        }

        Ok(())
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.initialized && self.application.is_some()
    }

    pub fn application(&self) -> Option<&F::Application> {
        self.application.as_ref()
    }

    pub fn application_mut(&mut self) -> Result<&mut F::Application> {
        self.application.as_mut().ok_or(Error::NotBootstrapped)
    }

    pub fn paths(&self) -> &PathRegistry {
        &self.paths
    }

    pub fn paths_mut(&mut self) -> &mut PathRegistry {
        &mut self.paths
    }

    pub fn settings(&self) -> &BridgeSettings {
        &self.settings
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Close the application session if a bootstrap happened.
    ///
    /// Safe to call repeatedly; only the first call after bootstrap reaches
    /// the application. Also runs on drop.
    pub fn shutdown(&mut self) -> Result<()> {
        if !self.initialized || self.session_closed {
            return Ok(());
        }
        self.session_closed = true;
        match self.application.as_mut() {
            Some(application) => {
                debug!("closing CMS session");
                application.close_session().map_err(Error::Session)
            }
            None => Ok(()),
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.session_closed
    }
}

impl<F: ApplicationFactory> Drop for Environment<F> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!(error = %e, "failed to close CMS session on teardown");
        }
    }
}

impl<F: ApplicationFactory> fmt::Debug for Environment<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("working_dir", &self.working_dir)
            .field("verbosity", &self.verbosity)
            .field("paths", &self.paths)
            .field("initialized", &self.initialized)
            .field("has_application", &self.application.is_some())
            .field("session_closed", &self.session_closed)
            .finish()
    }
}
