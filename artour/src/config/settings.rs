//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Position tracking settings
    pub tracking: TrackingSettings,
    /// Sector slotting settings
    pub slotting: SlottingSettings,
    /// Directory service settings
    pub directory: DirectorySettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Position tracking configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSettings {
    /// Minimum movement in meters before POIs are refetched.
    pub reload_distance_m: f64,
}

/// Sector slotting configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SlottingSettings {
    /// Maximum distance in meters for a POI to be displayed.
    pub max_poi_distance_m: f64,
}

/// Directory service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectorySettings {
    /// Search endpoint with `{lat}`/`{lon}` placeholders.
    pub endpoint: String,
    /// Bearer token for the directory API, if required.
    pub api_key: Option<String>,
    /// Timeout in seconds for directory requests.
    pub timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory for log files.
    pub directory: String,
    /// Log file name.
    pub file: String,
}
