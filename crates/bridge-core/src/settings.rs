//! Bridge settings, service credentials and verbosity.
//!
//! The package manager hands over an optional settings block (the `joomla`
//! key of its configuration). Every key is optional; unset credentials fall
//! back to the platform's conventional super user.

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use bridge_fs::{ConfigStore, NormalizedPath};

use crate::error::{Error, Result};

/// Key of the settings block inside the package manager configuration.
pub const SETTINGS_KEY: &str = "joomla";

const DEFAULT_NAME: &str = "root";
const DEFAULT_USERNAME: &str = "root";
const DEFAULT_GROUPS: &[u32] = &[8];
const DEFAULT_EMAIL: &str = "root@localhost.home";

/// Settings block as supplied by the package manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeSettings {
    /// Site root relative to the working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basedir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Identity the bridge authenticates against the CMS with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub name: String,
    pub username: String,
    pub groups: Vec<u32>,
    pub email: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            groups: DEFAULT_GROUPS.to_vec(),
            email: DEFAULT_EMAIL.to_string(),
        }
    }
}

impl BridgeSettings {
    /// Interpret a raw settings block.
    ///
    /// Anything that is not an object (absent, `null`, a scalar, a list)
    /// counts as "nothing configured".
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Ok(Self::default());
        }
        serde_json::from_value(value.clone()).map_err(|e| Error::Settings {
            message: e.to_string(),
        })
    }

    /// Extract the block stored under [`SETTINGS_KEY`] of a package manager
    /// configuration object.
    pub fn from_package_config(config: &serde_json::Value) -> Result<Self> {
        match config.get(SETTINGS_KEY) {
            Some(block) => Self::from_value(block),
            None => Ok(Self::default()),
        }
    }

    /// Load a settings block from a `.toml` or `.json` file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    /// Merge the configured credential keys over the defaults.
    pub fn credentials(&self) -> Credentials {
        let defaults = Credentials::default();
        Credentials {
            name: self.name.clone().unwrap_or(defaults.name),
            username: self.username.clone().unwrap_or(defaults.username),
            groups: self.groups.clone().unwrap_or(defaults.groups),
            email: self.email.clone().unwrap_or(defaults.email),
        }
    }

    /// Site root for `working_dir`: joined with `basedir` when one is set.
    pub fn base_path(&self, working_dir: &NormalizedPath) -> NormalizedPath {
        match self.basedir.as_deref() {
            Some(basedir) if !basedir.is_empty() => working_dir.join(basedir),
            _ => working_dir.clone(),
        }
    }
}

/// Output verbosity requested by the package manager's caller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Verbosity {
    #[default]
    Normal,
    Verbose,
    VeryVerbose,
    Debug,
}

impl Verbosity {
    /// Pick the highest level whose flag is set.
    pub fn from_flags(debug: bool, very_verbose: bool, verbose: bool) -> Self {
        if debug {
            Self::Debug
        } else if very_verbose {
            Self::VeryVerbose
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Maximum `tracing` level shown at this verbosity.
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Self::Normal => LevelFilter::WARN,
            Self::Verbose => LevelFilter::INFO,
            Self::VeryVerbose => LevelFilter::DEBUG,
            Self::Debug => LevelFilter::TRACE,
        }
    }
}
