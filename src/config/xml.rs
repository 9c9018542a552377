//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - A missing file means "use defaults"; no template is written.
//!
//! Notes:
//! - Unknown XML fields are rejected so typos surface instead of being ignored.
//! - Values are trimmed; an empty `<log_file>` means no file logging.

use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};
use crate::errors::GuardFsError;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "json", default, deserialize_with = "de_bool_trimmed_opt")]
    json: Option<bool>,
    #[serde(rename = "dry_run", default, deserialize_with = "de_bool_trimmed_opt")]
    dry_run: Option<bool>,
}

// Custom deserializer that trims surrounding whitespace for optional bools
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "expected true/false, got '{other}'"
            ))),
        },
    }
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Result<Config, GuardFsError> {
    let mut cfg = Config::default();

    if let Some(s) = parsed.log_level.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_level = trimmed.parse::<LogLevel>()?;
        }
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }
    cfg.json = parsed.json.unwrap_or(false);
    cfg.dry_run = parsed.dry_run.unwrap_or(false);

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config, GuardFsError> {
    let contents = fs::read_to_string(path).map_err(|source| GuardFsError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: XmlConfig =
        from_xml_str(&contents).map_err(|e| GuardFsError::ConfigInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    xml_to_config(parsed)
}

/// Load the effective config: the XML file at `default_config_path()` if it
/// exists, else defaults. Returns the config and the path it came from.
pub fn load_config() -> Result<(Config, Option<PathBuf>), GuardFsError> {
    let Some(path) = default_config_path() else {
        debug!("No config location could be determined; using defaults");
        return Ok((Config::default(), None));
    };
    if !path.exists() {
        debug!("No config file at {}; using defaults", path.display());
        return Ok((Config::default(), None));
    }
    let cfg = load_config_from_xml_path(&path)?;
    debug!("Loaded config from {}", path.display());
    Ok((cfg, Some(path)))
}
