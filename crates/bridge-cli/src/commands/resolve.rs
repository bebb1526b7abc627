//! The `resolve` command

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use bridge_manifest::{Manifest, resolve};

use crate::error::Result;

#[derive(Debug, Serialize)]
struct ResolveReport<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    element: &'a str,
    resolved: bool,
}

/// Print the element identity of the manifest at `path`.
///
/// An unresolvable element is not an error, but the command reports it as
/// unsuccessful.
pub fn run_resolve(path: &Path, json: bool) -> Result<bool> {
    let manifest = Manifest::from_path(path)?;
    let identity = resolve(&manifest);
    tracing::debug!(manifest = %path.display(), %identity, "resolved");

    if json {
        let report = ResolveReport {
            kind: identity.kind.as_str(),
            element: &identity.element,
            resolved: identity.is_resolved(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(identity.is_resolved());
    }

    println!("{:<8} {}", "type".dimmed(), identity.kind);
    if identity.is_resolved() {
        println!("{:<8} {}", "element".dimmed(), identity.element.green());
    } else {
        println!("{:<8} {}", "element".dimmed(), "(unresolved)".yellow());
        eprintln!(
            "{} no element could be derived from {}",
            "warning:".yellow().bold(),
            path.display()
        );
    }
    Ok(identity.is_resolved())
}
