//! Default values for all configuration settings.

use super::settings::*;
use crate::directory::DEFAULT_ENDPOINT;
use crate::slotter::DEFAULT_MAX_POI_DISTANCE_M;
use crate::tracker::DEFAULT_RELOAD_DISTANCE_M;

/// Default timeout in seconds for directory requests.
pub const DEFAULT_DIRECTORY_TIMEOUT_SECS: u64 = 10;

/// Default directory for log files.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "artour.log";

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            reload_distance_m: DEFAULT_RELOAD_DISTANCE_M,
        }
    }
}

impl Default for SlottingSettings {
    fn default() -> Self {
        Self {
            max_poi_distance_m: DEFAULT_MAX_POI_DISTANCE_M,
        }
    }
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_DIRECTORY_TIMEOUT_SECS,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: DEFAULT_LOG_DIR.to_string(),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            tracking: TrackingSettings::default(),
            slotting: SlottingSettings::default(),
            directory: DirectorySettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}
