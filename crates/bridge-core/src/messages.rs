//! Turning the application's message queue into one diagnostic.

use std::fmt;

use crate::host::QueuedMessage;

const ERROR_KIND: &str = "error";

/// The lifecycle operation a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Install,
    Update,
}

impl Operation {
    /// Verb used in diagnostics ("Error while installing ...").
    pub fn gerund(&self) -> &'static str {
        match self {
            Self::Install => "installing",
            Self::Update => "updating",
        }
    }

    /// Progress line shown when the operation starts.
    pub fn progress_line(&self) -> &'static str {
        match self {
            Self::Install => "Installing into Joomla",
            Self::Update => "Updating Joomla extension",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => f.write_str("install"),
            Self::Update => f.write_str("update"),
        }
    }
}

/// Texts of all `error` entries, in queue order.
pub fn collect_error_messages(queue: &[QueuedMessage]) -> Vec<String> {
    queue
        .iter()
        .filter(|m| m.kind == ERROR_KIND)
        .map(|m| m.message.clone())
        .collect()
}

/// The application rejected an install or update.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error while {} {}{}", .operation.gerund(), .package, detail(.messages))]
pub struct AggregatedError {
    pub operation: Operation,
    pub package: String,
    pub messages: Vec<String>,
}

impl AggregatedError {
    pub fn new(operation: Operation, package: impl Into<String>, messages: Vec<String>) -> Self {
        Self {
            operation,
            package: package.into(),
            messages,
        }
    }

    /// Build the diagnostic from the error entries of `queue`.
    pub fn from_queue(operation: Operation, package: impl Into<String>, queue: &[QueuedMessage]) -> Self {
        Self::new(operation, package, collect_error_messages(queue))
    }
}

fn detail(messages: &[String]) -> String {
    if messages.is_empty() {
        String::new()
    } else {
        format!(":\n{}", messages.join("\n"))
    }
}
