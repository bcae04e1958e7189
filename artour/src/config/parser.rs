//! INI parsing logic for converting `Ini` -> `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct
//! fields.

use ini::Ini;
use tracing::warn;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in
/// the INI. `reload_distance` falls back to its default with a warning
/// when unparseable - a misconfigured threshold should degrade, not
/// fail the session.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [tracking] section
    if let Some(section) = ini.section(Some("tracking")) {
        if let Some(v) = section.get("reload_distance") {
            match v.trim().parse::<f64>() {
                Ok(meters) if meters > 0.0 => config.tracking.reload_distance_m = meters,
                _ => warn!(
                    value = v,
                    default = config.tracking.reload_distance_m,
                    "Ignoring unparseable tracking.reload_distance, using default"
                ),
            }
        }
    }

    // [slotting] section
    if let Some(section) = ini.section(Some("slotting")) {
        if let Some(v) = section.get("max_poi_distance") {
            config.slotting.max_poi_distance_m = parse_positive_f64(v).map_err(|reason| {
                ConfigFileError::InvalidValue {
                    section: "slotting".to_string(),
                    key: "max_poi_distance".to_string(),
                    value: v.to_string(),
                    reason,
                }
            })?;
        }
    }

    // [directory] section
    if let Some(section) = ini.section(Some("directory")) {
        if let Some(v) = section.get("endpoint") {
            let v = v.trim();
            if !v.is_empty() {
                config.directory.endpoint = v.to_string();
            }
        }
        if let Some(v) = section.get("api_key") {
            let v = v.trim();
            if !v.is_empty() {
                config.directory.api_key = Some(v.to_string());
            }
        }
        if let Some(v) = section.get("timeout") {
            config.directory.timeout_secs =
                v.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigFileError::InvalidValue {
                        section: "directory".to_string(),
                        key: "timeout".to_string(),
                        value: v.to_string(),
                        reason: "must be a whole number of seconds".to_string(),
                    })?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = v.to_string();
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

fn parse_positive_f64(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(v) if v > 0.0 && v.is_finite() => Ok(v),
        Ok(_) => Err("must be a positive number of meters".to_string()),
        Err(_) => Err("must be a number of meters".to_string()),
    }
}
