//! Output sink for lifecycle progress and swallowed failures.

use tracing::{error, info};

use crate::installer::InstallError;
use crate::messages::Operation;

/// Receives what the package manager would print to its console.
pub trait Reporter {
    fn operation_started(&mut self, operation: Operation, package: &str);

    /// A failure that is reported instead of being raised.
    fn operation_failed(&mut self, package: &str, error: &InstallError);
}

/// Default reporter writing through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn operation_started(&mut self, operation: Operation, package: &str) {
        info!(package, "{}", operation.progress_line());
    }

    fn operation_failed(&mut self, package: &str, error: &InstallError) {
        error!("{}", render_failure(package, error));
    }
}

/// Render a failure as `[package]: message`, followed by the origin line
/// when the application supplied one.
pub fn render_failure(package: &str, error: &InstallError) -> String {
    let mut out = format!("[{package}]: {error}");
    if let Some(origin) = error.origin() {
        out.push_str("\n[origin]: ");
        out.push_str(origin);
    }
    out
}
