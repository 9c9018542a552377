//! Config module.
//! Provides configuration types, the default config location and XML loading.
//!
//! Precedence (lowest to highest): built-in defaults, XML file, CLI flags.
//! CLI overrides are applied by `cli::Args::apply_overrides`.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{load_config, load_config_from_xml_path};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GUARDFS_CONFIG";
