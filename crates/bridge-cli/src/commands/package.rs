//! Package-level queries: staging path and type support

use colored::Colorize;

use bridge_core::{INSTALLER_TYPE, Package, install_path, supports};

use crate::error::Result;

/// Print where the package manager stages `package`.
pub fn run_install_path(package: &str) -> Result<bool> {
    println!("{}", install_path(&Package::new(package)));
    Ok(true)
}

/// Print whether `package_type` is handled by the bridge.
pub fn run_supports(package_type: &str) -> Result<bool> {
    let supported = supports(package_type);
    println!("{supported}");
    if !supported {
        eprintln!(
            "{} only packages of type {} are handled",
            "note:".dimmed(),
            INSTALLER_TYPE.cyan()
        );
    }
    Ok(supported)
}
