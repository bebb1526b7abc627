//! In-memory stand-in for the CMS application.

use std::cell::RefCell;
use std::collections::BTreeMap;

use bridge_core::{
    Application, ApplicationFactory, ApplicationOptions, Credentials, HostError, HostResult,
    ManifestInstaller, QueuedMessage,
};
use bridge_fs::NormalizedPath;
use bridge_manifest::{ExtensionType, Manifest, resolve};

/// How the fake answers an install or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Return `true` and record the extension as installed.
    Accept,
    /// Enqueue the messages and return `false`.
    Reject(Vec<QueuedMessage>),
    /// Return an error.
    Raise(HostError),
}

/// Calls observed by the fake, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Install(String),
    Update(String),
    HasExtension(String, ExtensionType),
}

#[derive(Debug, Clone, Default)]
struct FakeManifestInstaller {
    manifests: BTreeMap<String, Result<Manifest, HostError>>,
    paths: Vec<(String, String)>,
    source: Option<String>,
}

impl ManifestInstaller for FakeManifestInstaller {
    fn set_path(&mut self, key: &str, path: &NormalizedPath) {
        self.paths.push((key.to_string(), path.as_str().to_string()));
        if key == "source" {
            self.source = Some(path.as_str().to_string());
        }
    }

    fn manifest(&self) -> HostResult<Option<&Manifest>> {
        let Some(source) = self.source.as_deref() else {
            return Ok(None);
        };
        match self.manifests.get(source) {
            Some(Ok(manifest)) => Ok(Some(manifest)),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(None),
        }
    }
}

/// Scriptable CMS application.
#[derive(Debug, Clone)]
pub struct FakeApplication {
    installer: FakeManifestInstaller,
    extensions: Vec<(String, ExtensionType)>,
    queue: Vec<QueuedMessage>,
    install_response: Response,
    update_response: Response,
    auth_error: Option<HostError>,
    close_error: Option<HostError>,
    calls: RefCell<Vec<HostCall>>,
    authenticated_as: Option<Credentials>,
    options: Option<ApplicationOptions>,
    sessions_closed: usize,
}

impl Default for FakeApplication {
    fn default() -> Self {
        Self {
            installer: FakeManifestInstaller::default(),
            extensions: Vec::new(),
            queue: Vec::new(),
            install_response: Response::Accept,
            update_response: Response::Accept,
            auth_error: None,
            close_error: None,
            calls: RefCell::new(Vec::new()),
            authenticated_as: None,
            options: None,
            sessions_closed: 0,
        }
    }
}

impl FakeApplication {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `manifest` for the staging path `path`.
    pub fn with_manifest(mut self, path: &str, manifest: Manifest) -> Self {
        self.installer
            .manifests
            .insert(path.to_string(), Ok(manifest));
        self
    }

    /// Fail manifest loading for `path`.
    pub fn with_broken_manifest(mut self, path: &str, error: HostError) -> Self {
        self.installer.manifests.insert(path.to_string(), Err(error));
        self
    }

    pub fn with_extension(mut self, element: &str, kind: ExtensionType) -> Self {
        self.extensions.push((element.to_string(), kind));
        self
    }

    pub fn with_queued(mut self, message: QueuedMessage) -> Self {
        self.queue.push(message);
        self
    }

    pub fn on_install(mut self, response: Response) -> Self {
        self.install_response = response;
        self
    }

    pub fn on_update(mut self, response: Response) -> Self {
        self.update_response = response;
        self
    }

    pub fn failing_authentication(mut self, error: HostError) -> Self {
        self.auth_error = Some(error);
        self
    }

    pub fn failing_close(mut self, error: HostError) -> Self {
        self.close_error = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    pub fn extension_queries(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, HostCall::HasExtension(..)))
            .count()
    }

    pub fn authenticated_as(&self) -> Option<&Credentials> {
        self.authenticated_as.as_ref()
    }

    pub fn options(&self) -> Option<&ApplicationOptions> {
        self.options.as_ref()
    }

    pub fn sessions_closed(&self) -> usize {
        self.sessions_closed
    }

    /// Every `(key, path)` handed to the installer.
    pub fn installer_paths(&self) -> &[(String, String)] {
        &self.installer.paths
    }

    pub fn installed(&self) -> &[(String, ExtensionType)] {
        &self.extensions
    }

    fn respond(&mut self, response: Response, path: &NormalizedPath) -> HostResult<bool> {
        match response {
            Response::Accept => {
                if let Some(Ok(manifest)) = self.installer.manifests.get(path.as_str()) {
                    let identity = resolve(manifest);
                    if identity.is_resolved() {
                        self.extensions.push((identity.element, identity.kind));
                    }
                }
                Ok(true)
            }
            Response::Reject(messages) => {
                self.queue.extend(messages);
                Ok(false)
            }
            Response::Raise(error) => Err(error),
        }
    }
}

impl Application for FakeApplication {
    fn authenticate(&mut self, credentials: &Credentials) -> HostResult<()> {
        if let Some(error) = self.auth_error.clone() {
            return Err(error);
        }
        self.authenticated_as = Some(credentials.clone());
        Ok(())
    }

    fn install(&mut self, path: &NormalizedPath) -> HostResult<bool> {
        self.calls
            .borrow_mut()
            .push(HostCall::Install(path.as_str().to_string()));
        self.respond(self.install_response.clone(), path)
    }

    fn update(&mut self, path: &NormalizedPath) -> HostResult<bool> {
        self.calls
            .borrow_mut()
            .push(HostCall::Update(path.as_str().to_string()));
        self.respond(self.update_response.clone(), path)
    }

    fn has_extension(&self, element: &str, kind: ExtensionType) -> HostResult<bool> {
        self.calls
            .borrow_mut()
            .push(HostCall::HasExtension(element.to_string(), kind));
        Ok(self
            .extensions
            .iter()
            .any(|(e, k)| e == element && *k == kind))
    }

    fn installer(&mut self) -> &mut dyn ManifestInstaller {
        &mut self.installer
    }

    fn message_queue(&self) -> &[QueuedMessage] {
        &self.queue
    }

    fn close_session(&mut self) -> HostResult<()> {
        self.sessions_closed += 1;
        match self.close_error.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Factory handing out clones of a template application.
#[derive(Debug, Clone, Default)]
pub struct FakeFactory {
    template: FakeApplication,
    created: usize,
    create_error: Option<HostError>,
}

impl FakeFactory {
    pub fn new(template: FakeApplication) -> Self {
        Self {
            template,
            created: 0,
            create_error: None,
        }
    }

    pub fn failing(error: HostError) -> Self {
        Self {
            create_error: Some(error),
            ..Self::default()
        }
    }

    /// Number of applications created so far.
    pub fn created(&self) -> usize {
        self.created
    }
}

impl ApplicationFactory for FakeFactory {
    type Application = FakeApplication;

    fn create(&mut self, options: &ApplicationOptions) -> HostResult<FakeApplication> {
        if let Some(error) = self.create_error.clone() {
            return Err(error);
        }
        self.created += 1;
        let mut application = self.template.clone();
        application.options = Some(options.clone());
        Ok(application)
    }
}
