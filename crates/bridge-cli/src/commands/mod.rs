//! Command implementations for bridge-cli

pub mod package;
pub mod resolve;
pub mod settings;

pub use package::{run_install_path, run_supports};
pub use resolve::run_resolve;
pub use settings::run_settings;
