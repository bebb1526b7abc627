//! The `settings` command

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use bridge_core::{BridgeSettings, Credentials};
use bridge_fs::{ConfigStore, NormalizedPath};

use crate::error::Result;

#[derive(Debug, Serialize)]
struct SettingsReport {
    basedir: Option<String>,
    base_path: String,
    credentials: Credentials,
}

fn load_settings(file: Option<&Path>, composer: Option<&Path>) -> Result<BridgeSettings> {
    if let Some(file) = file {
        return Ok(BridgeSettings::load(&NormalizedPath::new(file))?);
    }
    if let Some(composer) = composer {
        let manifest: serde_json::Value = ConfigStore::new().load(&NormalizedPath::new(composer))?;
        let config = manifest
            .get("config")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        return Ok(BridgeSettings::from_package_config(&config)?);
    }
    Ok(BridgeSettings::default())
}

/// Print the settings the bridge would bootstrap with from `cwd`.
pub fn run_settings(
    cwd: &Path,
    file: Option<&Path>,
    composer: Option<&Path>,
    json: bool,
) -> Result<bool> {
    let settings = load_settings(file, composer)?;
    let base_path = settings.base_path(&NormalizedPath::new(cwd));
    let report = SettingsReport {
        basedir: settings.basedir.clone(),
        base_path: base_path.to_string(),
        credentials: settings.credentials(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(true);
    }

    let groups: Vec<String> = report
        .credentials
        .groups
        .iter()
        .map(ToString::to_string)
        .collect();

    println!("{}", "Effective settings".bold());
    println!(
        "  {:<10} {}",
        "basedir".cyan(),
        report.basedir.as_deref().unwrap_or("(none)")
    );
    println!("  {:<10} {}", "base path".cyan(), report.base_path);
    println!("  {:<10} {}", "name".cyan(), report.credentials.name);
    println!("  {:<10} {}", "username".cyan(), report.credentials.username);
    println!("  {:<10} {}", "groups".cyan(), groups.join(", "));
    println!("  {:<10} {}", "email".cyan(), report.credentials.email);
    Ok(true)
}
