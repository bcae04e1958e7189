//! Point-of-interest record type

use crate::geo::Coordinate;

/// A point of interest from the business directory.
///
/// Identity is the directory-assigned `id` alone: two records with equal
/// ids describe the same business even if other fields differ between
/// fetches. The `id` is NOT a rendering identifier - see
/// [`EntityId`](crate::scene::EntityId) for that.
#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    /// Stable identifier assigned by the directory service.
    pub id: String,

    /// Business display name.
    pub name: String,

    /// Geographic location of the business.
    pub coordinates: Coordinate,

    /// Directory rating, if the business has one.
    pub rating: Option<f32>,

    /// Primary category label (e.g. "cafe", "museum").
    pub category: Option<String>,

    /// Street address for the detail view.
    pub address: Option<String>,
}

impl Poi {
    /// Create a POI with the required fields only.
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinates: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates,
            rating: None,
            category: None,
            address: None,
        }
    }

    /// Attach a rating.
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Attach a category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach a street address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Marker label shown on the rendered bubble.
    ///
    /// The name, plus the rating when available.
    pub fn label(&self) -> String {
        match self.rating {
            Some(rating) => format!("{} ({:.1})", self.name, rating),
            None => self.name.clone(),
        }
    }
}
