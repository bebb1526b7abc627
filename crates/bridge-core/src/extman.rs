//! Extman interoperability.
//!
//! Packages of the framework vendor rely on the extension manager's row
//! decorator being registered before the CMS installer runs. Loading it
//! needs the vendor framework inside the CMS, so the capability is injected;
//! [`NoopExtman`] stands in when the framework is absent.

use tracing::debug;

use crate::package::PackageDescriptor;

/// Vendor namespace whose packages need extman support.
pub const EXTMAN_VENDOR: &str = "joomlatools";
/// The extension manager package itself.
pub const EXTMAN_PACKAGE: &str = "extman";
/// Plugin `(group, name)` that boots the vendor framework.
pub const FRAMEWORK_PLUGIN: (&str, &str) = ("system", "koowa");
/// Object identifier of the extension-aware row decorator.
pub const ROW_DECORATOR: &str = "com://admin/extman.database.row.extension";

/// Framework operations the hook needs from the CMS.
pub trait ExtmanSupport {
    fn import_plugin(&mut self, group: &str, name: &str);

    /// Whether the object behind `identifier` is already loaded.
    fn has_object(&self, identifier: &str) -> bool;

    fn load_object(&mut self, identifier: &str);
}

/// Used when the vendor framework is not present.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopExtman;

impl ExtmanSupport for NoopExtman {
    fn import_plugin(&mut self, _group: &str, _name: &str) {}

    fn has_object(&self, _identifier: &str) -> bool {
        false
    }

    fn load_object(&mut self, _identifier: &str) {}
}

/// Whether a package of this name needs extman support.
pub fn requires_extman(pretty_name: &str) -> bool {
    let lowered = pretty_name.to_lowercase();
    let mut parts = lowered.split('/');
    parts.next() == Some(EXTMAN_VENDOR) && parts.next() != Some(EXTMAN_PACKAGE)
}

/// Make sure the row decorator is loaded for vendor packages.
///
/// Returns whether the hook applied to `package`.
pub fn setup_extman_support(
    support: &mut dyn ExtmanSupport,
    package: &dyn PackageDescriptor,
) -> bool {
    if !requires_extman(package.pretty_name()) {
        return false;
    }

    let (group, name) = FRAMEWORK_PLUGIN;
    support.import_plugin(group, name);
    if !support.has_object(ROW_DECORATOR) {
        debug!(package = package.pretty_name(), "loading extman row decorator");
        support.load_object(ROW_DECORATOR);
    }
    true
}
