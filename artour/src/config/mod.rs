//! Configuration for ARTour components.
//!
//! Configuration lives in an INI file with one section per concern:
//!
//! ```ini
//! [tracking]
//! reload_distance = 5
//!
//! [slotting]
//! max_poi_distance = 2000
//!
//! [directory]
//! endpoint = https://api.yelp.com/v3/businesses/search?latitude={lat}&longitude={lon}&limit=20
//! api_key = ...
//! timeout = 10
//! ```
//!
//! Parsing overlays file values onto [`ConfigFile::default()`], so every
//! key is optional. An absent or unparseable `reload_distance` falls
//! back to its 5 meter default rather than failing.

mod defaults;
mod file;
mod parser;
mod settings;

pub use defaults::{DEFAULT_DIRECTORY_TIMEOUT_SECS, DEFAULT_LOG_DIR, DEFAULT_LOG_FILE};
pub use file::ConfigFileError;
pub use settings::{
    ConfigFile, DirectorySettings, LoggingSettings, SlottingSettings, TrackingSettings,
};

use crate::service::TourEngineConfig;

impl ConfigFile {
    /// Derive the engine configuration from the loaded settings.
    pub fn engine_config(&self) -> TourEngineConfig {
        TourEngineConfig {
            reload_distance_m: self.tracking.reload_distance_m,
            max_poi_distance_m: self.slotting.max_poi_distance_m,
            ..TourEngineConfig::default()
        }
    }
}
