//! Recording collaborators whose observations outlive the installer.
//!
//! The installer owns its reporter and extman capability, so both keep
//! their records behind a shared handle that the test clones first.

use std::cell::RefCell;
use std::rc::Rc;

use bridge_core::{ExtmanSupport, InstallError, Operation, Reporter, render_failure};

/// What a [`RecordingReporter`] saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Started(Operation, String),
    /// Rendered failure text
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    events: Rc<RefCell<Vec<ReportEvent>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.borrow().clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Failed(text) => Some(text.clone()),
                ReportEvent::Started(..) => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn operation_started(&mut self, operation: Operation, package: &str) {
        self.events
            .borrow_mut()
            .push(ReportEvent::Started(operation, package.to_string()));
    }

    fn operation_failed(&mut self, package: &str, error: &InstallError) {
        self.events
            .borrow_mut()
            .push(ReportEvent::Failed(render_failure(package, error)));
    }
}

#[derive(Debug, Default)]
struct ExtmanLog {
    plugins: Vec<String>,
    loaded: Vec<String>,
}

/// Extman capability with the vendor framework present.
#[derive(Debug, Clone, Default)]
pub struct RecordingExtman {
    log: Rc<RefCell<ExtmanLog>>,
}

impl RecordingExtman {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn imported_plugins(&self) -> Vec<String> {
        self.log.borrow().plugins.clone()
    }

    pub fn loaded_objects(&self) -> Vec<String> {
        self.log.borrow().loaded.clone()
    }
}

impl ExtmanSupport for RecordingExtman {
    fn import_plugin(&mut self, group: &str, name: &str) {
        self.log.borrow_mut().plugins.push(format!("{group}/{name}"));
    }

    fn has_object(&self, identifier: &str) -> bool {
        self.log.borrow().loaded.iter().any(|l| l == identifier)
    }

    fn load_object(&mut self, identifier: &str) {
        self.log.borrow_mut().loaded.push(identifier.to_string());
    }
}
