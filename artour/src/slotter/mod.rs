//! Sector slotting - the placement algorithm
//!
//! Partitions the 360° around the user into [`SLOT_COUNT`] fixed angular
//! sectors of [`SECTOR_WIDTH_DEG`] each and selects at most one POI per
//! sector: the nearest candidate whose bearing falls inside the sector
//! and whose distance is within the display range.
//!
//! Sector `i` covers `[i*30, (i+1)*30)` degrees clockwise from north -
//! inclusive low edge, exclusive high edge, with 360° wrapping to 0°, so
//! the sectors partition [0°, 360°) with no gap or overlap.
//!
//! Every pass is a full recomputation: exactly [`SLOT_COUNT`] sector
//! scans over the candidate list, O(12 * N). Incremental reconciliation
//! against the scene happens downstream in
//! [`SceneBinding`](crate::scene::SceneBinding).

use tracing::trace;

use crate::geo::{self, Coordinate, LocalPosition};
use crate::poi::Poi;

/// Number of angular sectors around the user.
pub const SLOT_COUNT: usize = 12;

/// Angular width of one sector in degrees.
pub const SECTOR_WIDTH_DEG: f64 = 30.0;

/// Default maximum distance in meters for a POI to be displayed.
pub const DEFAULT_MAX_POI_DISTANCE_M: f64 = 2_000.0;

/// A POI selected for one sector, with its placement geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotAssignment {
    /// The selected POI.
    pub poi: Poi,

    /// Bearing from the user to the POI, degrees in [0, 360).
    pub bearing_deg: f64,

    /// Geodesic distance from the user in meters.
    pub distance_m: f64,

    /// Marker position in the local tangent plane.
    pub position: LocalPosition,
}

/// Result of one slotting pass: at most one assignment per sector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotAssignments {
    slots: [Option<SlotAssignment>; SLOT_COUNT],
}

impl SlotAssignments {
    /// The assignment for a sector, if any.
    pub fn get(&self, slot: usize) -> Option<&SlotAssignment> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    /// Iterate over `(slot index, assignment)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&SlotAssignment>)> {
        self.slots.iter().enumerate().map(|(i, s)| (i, s.as_ref()))
    }

    /// Number of sectors that received a POI.
    pub fn assigned_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// Bearing range of a sector: `(low, high)` with `low` inclusive and
/// `high` exclusive.
#[inline]
pub fn sector_bounds(slot: usize) -> (f64, f64) {
    let low = slot as f64 * SECTOR_WIDTH_DEG;
    (low, low + SECTOR_WIDTH_DEG)
}

/// True if a bearing in [0, 360) falls inside the sector.
#[inline]
pub fn sector_contains(slot: usize, bearing_deg: f64) -> bool {
    let (low, high) = sector_bounds(slot);
    bearing_deg >= low && bearing_deg < high
}

/// The placement algorithm.
///
/// Stateless apart from its configuration; each call to [`assign`] is an
/// independent full recomputation.
///
/// [`assign`]: SectorSlotter::assign
#[derive(Debug, Clone)]
pub struct SectorSlotter {
    max_poi_distance_m: f64,
}

impl Default for SectorSlotter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POI_DISTANCE_M)
    }
}

impl SectorSlotter {
    /// Create a slotter displaying POIs up to the given range in meters.
    pub fn new(max_poi_distance_m: f64) -> Self {
        Self { max_poi_distance_m }
    }

    /// Configured display range in meters.
    pub fn max_poi_distance_m(&self) -> f64 {
        self.max_poi_distance_m
    }

    /// Compute slot assignments for the candidates around a user location.
    ///
    /// For each sector, candidates are filtered by bearing and display
    /// range, then the nearest wins; ties break towards the earlier
    /// candidate in `candidates` (first-seen order).
    pub fn assign(&self, user_location: &Coordinate, candidates: &[Poi]) -> SlotAssignments {
        let mut assignments = SlotAssignments::default();

        for slot in 0..SLOT_COUNT {
            let mut best: Option<(f64, f64, &Poi)> = None;

            for poi in candidates {
                let bearing = geo::bearing(user_location, &poi.coordinates);
                if !sector_contains(slot, bearing) {
                    continue;
                }

                let distance = geo::distance(user_location, &poi.coordinates);
                if distance > self.max_poi_distance_m {
                    continue;
                }

                // Strict < keeps the first-seen candidate on a tie
                if best.map_or(true, |(_, best_distance, _)| distance < best_distance) {
                    best = Some((bearing, distance, poi));
                }
            }

            if let Some((bearing_deg, distance_m, poi)) = best {
                let position = geo::local_position(user_location, &poi.coordinates);
                trace!(
                    slot,
                    poi = %poi.id,
                    bearing = bearing_deg,
                    distance = distance_m,
                    "Slot assigned"
                );
                assignments.slots[slot] = Some(SlotAssignment {
                    poi: poi.clone(),
                    bearing_deg,
                    distance_m,
                    position,
                });
            }
        }

        assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Coordinate = Coordinate {
        latitude: 0.0,
        longitude: 0.0,
    };

    /// Place a POI at a given bearing (degrees) and distance (meters)
    /// from the origin, using the flat-earth inverse at equator scale.
    fn poi_at(id: &str, bearing_deg: f64, distance_m: f64) -> Poi {
        let theta = bearing_deg.to_radians();
        let meters_per_degree = 111_195.0;
        let lat = distance_m * theta.cos() / meters_per_degree;
        let lon = distance_m * theta.sin() / meters_per_degree;
        Poi::new(id, id.to_uppercase(), Coordinate::new(lat, lon))
    }

    #[test]
    fn test_sector_bounds_partition_the_circle() {
        // No gap, no overlap
        for slot in 0..SLOT_COUNT {
            let (low, high) = sector_bounds(slot);
            assert_eq!(low, slot as f64 * 30.0);
            assert_eq!(high - low, SECTOR_WIDTH_DEG);
        }
        assert_eq!(sector_bounds(SLOT_COUNT - 1).1, 360.0);
    }

    #[test]
    fn test_sector_boundaries_are_low_inclusive() {
        assert!(sector_contains(0, 0.0));
        assert!(!sector_contains(0, 30.0));
        assert!(sector_contains(1, 30.0));
        assert!(sector_contains(11, 359.999));
        // 360 itself never occurs: bearings are normalized into [0, 360)
        assert!(!sector_contains(11, 360.0));
    }

    #[test]
    fn test_one_candidate_per_sector() {
        // One POI strictly inside each of the 12 sectors
        let candidates: Vec<Poi> = (0..12)
            .map(|i| poi_at(&format!("p{i}"), i as f64 * 30.0 + 15.0, 500.0))
            .collect();

        let assignments = SectorSlotter::default().assign(&ORIGIN, &candidates);

        assert_eq!(assignments.assigned_count(), 12);
        for (slot, assignment) in assignments.iter() {
            let assignment = assignment.expect("every sector should be filled");
            assert_eq!(assignment.poi.id, format!("p{slot}"));
        }
    }

    #[test]
    fn test_nearer_candidate_wins_sector() {
        // 13 candidates: one per sector plus an extra, nearer one in sector 0
        let mut candidates: Vec<Poi> = (0..12)
            .map(|i| poi_at(&format!("p{i}"), i as f64 * 30.0 + 15.0, 500.0))
            .collect();
        candidates.push(poi_at("nearer", 10.0, 120.0));

        let assignments = SectorSlotter::default().assign(&ORIGIN, &candidates);

        let slot0 = assignments.get(0).expect("sector 0 should be filled");
        assert_eq!(slot0.poi.id, "nearer");
        assert!((slot0.distance_m - 120.0).abs() < 2.0);

        // Other sectors keep their original candidates
        assert_eq!(assignments.get(1).unwrap().poi.id, "p1");
        assert_eq!(assignments.assigned_count(), 12);
    }

    #[test]
    fn test_distance_tie_breaks_to_first_seen() {
        let candidates = vec![
            poi_at("first", 15.0, 300.0),
            poi_at("second", 15.0, 300.0),
        ];

        let assignments = SectorSlotter::default().assign(&ORIGIN, &candidates);
        assert_eq!(assignments.get(0).unwrap().poi.id, "first");
    }

    #[test]
    fn test_out_of_range_candidates_are_dropped() {
        let candidates = vec![
            poi_at("near", 15.0, 500.0),
            poi_at("far", 45.0, 5_000.0),
        ];

        let assignments = SectorSlotter::new(2_000.0).assign(&ORIGIN, &candidates);

        assert!(assignments.get(0).is_some());
        assert!(
            assignments.get(1).is_none(),
            "beyond-range POI should not hold a slot"
        );
    }

    #[test]
    fn test_no_candidates_leaves_all_slots_empty() {
        let assignments = SectorSlotter::default().assign(&ORIGIN, &[]);
        assert_eq!(assignments.assigned_count(), 0);
    }

    #[test]
    fn test_assignment_geometry_is_consistent() {
        let candidates = vec![poi_at("east", 90.0, 400.0)];
        let assignments = SectorSlotter::default().assign(&ORIGIN, &candidates);

        let a = assignments.get(3).expect("90° lies in sector 3");
        assert!((a.bearing_deg - 90.0).abs() < 0.5);
        assert!((a.distance_m - 400.0).abs() < 2.0);
        // Due east: +x, z ~ 0
        assert!(a.position.x > 390.0);
        assert!(a.position.z.abs() < 10.0);
    }

    #[test]
    fn test_north_and_northeast_pois_take_adjacent_sectors() {
        // User at (0,0); X due north ~111m; Y at ~45° and ~78m
        let x = Poi::new("x", "X", Coordinate::new(0.001, 0.0));
        let y = Poi::new("y", "Y", Coordinate::new(0.0005, 0.0005));

        let assignments =
            SectorSlotter::default().assign(&ORIGIN, &[x.clone(), y.clone()]);

        assert_eq!(assignments.get(0).unwrap().poi.id, "x");
        assert_eq!(assignments.get(1).unwrap().poi.id, "y");
        assert_eq!(assignments.assigned_count(), 2);
    }
}
