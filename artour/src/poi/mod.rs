//! POI data model and session store
//!
//! Defines the [`Poi`] record fetched from the business directory and the
//! [`PoiStore`] that accumulates records across reload cycles,
//! deduplicated by directory id.

mod store;
mod types;

pub use store::PoiStore;
pub use types::Poi;
