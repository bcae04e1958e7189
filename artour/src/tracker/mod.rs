//! Position tracking with reload hysteresis
//!
//! The [`PositionTracker`] consumes location and heading updates and
//! decides when the POI set should be refetched and re-slotted. A reload
//! is triggered on the first position fix and thereafter only once the
//! user has moved more than the configured reload distance away from the
//! position of the previous reload, so sensor jitter never causes a
//! refetch on every tick.

mod events;

pub use events::SensorEvent;

use tracing::debug;

use crate::geo::{self, Coordinate};

/// Default minimum movement in meters before POIs are refetched.
pub const DEFAULT_RELOAD_DISTANCE_M: f64 = 5.0;

/// Outcome of a location update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadDecision {
    /// Fetch POIs for the new position and re-slot.
    Reload,
    /// Movement below the threshold; keep the current POI set.
    Hold,
}

/// Snapshot of the user's tracked state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UserState {
    /// Most recent position fix (None before the first update).
    pub current_location: Option<Coordinate>,

    /// Most recent heading in degrees [0, 360) (None before the first update).
    pub current_heading: Option<f32>,

    /// Position at which the last reload was triggered.
    pub previous_reload_location: Option<Coordinate>,
}

/// Tracks the user's position and applies the reload-distance hysteresis.
#[derive(Debug)]
pub struct PositionTracker {
    state: UserState,
    reload_distance_m: f64,
}

impl Default for PositionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_RELOAD_DISTANCE_M)
    }
}

impl PositionTracker {
    /// Create a tracker with the given reload distance in meters.
    pub fn new(reload_distance_m: f64) -> Self {
        Self {
            state: UserState::default(),
            reload_distance_m,
        }
    }

    /// Apply a position update.
    ///
    /// Always records the new position as current. Returns
    /// [`ReloadDecision::Reload`] when no reload has happened yet or the
    /// user moved strictly more than the reload distance since the last
    /// one; the reload anchor is advanced in that case.
    pub fn on_location_changed(&mut self, new_location: Coordinate) -> ReloadDecision {
        self.state.current_location = Some(new_location);

        let moved = self
            .state
            .previous_reload_location
            .map(|previous| geo::distance(&previous, &new_location));

        match moved {
            Some(meters) if meters <= self.reload_distance_m => {
                debug!(meters, threshold = self.reload_distance_m, "Holding POI set");
                ReloadDecision::Hold
            }
            _ => {
                debug!(
                    location = %new_location,
                    moved = ?moved,
                    "Reload triggered"
                );
                self.state.previous_reload_location = Some(new_location);
                ReloadDecision::Reload
            }
        }
    }

    /// Apply a heading update (normalized into [0, 360)).
    pub fn on_heading_changed(&mut self, heading: f32) {
        self.state.current_heading = Some(geo::normalize_bearing(heading as f64) as f32);
    }

    /// Most recent position fix.
    pub fn current_location(&self) -> Option<Coordinate> {
        self.state.current_location
    }

    /// Most recent heading in degrees [0, 360).
    pub fn current_heading(&self) -> Option<f32> {
        self.state.current_heading
    }

    /// Full state snapshot.
    pub fn user_state(&self) -> UserState {
        self.state
    }

    /// Configured reload distance in meters.
    pub fn reload_distance_m(&self) -> f64 {
        self.reload_distance_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ~0.0001° of latitude is ~11 meters.
    fn meters_north(origin: Coordinate, meters: f64) -> Coordinate {
        Coordinate::new(origin.latitude + meters / 111_195.0, origin.longitude)
    }

    #[test]
    fn test_first_fix_triggers_reload() {
        let mut tracker = PositionTracker::default();
        let fix = Coordinate::new(53.55, 9.99);

        assert_eq!(tracker.on_location_changed(fix), ReloadDecision::Reload);
        assert_eq!(tracker.current_location(), Some(fix));
        assert_eq!(tracker.user_state().previous_reload_location, Some(fix));
    }

    #[test]
    fn test_small_move_holds() {
        let mut tracker = PositionTracker::new(5.0);
        let origin = Coordinate::new(53.55, 9.99);
        tracker.on_location_changed(origin);

        let nearby = meters_north(origin, 2.0);
        assert_eq!(tracker.on_location_changed(nearby), ReloadDecision::Hold);

        // Current position still advances on a hold
        assert_eq!(tracker.current_location(), Some(nearby));
        // Reload anchor does not
        assert_eq!(tracker.user_state().previous_reload_location, Some(origin));
    }

    #[test]
    fn test_move_beyond_threshold_reloads() {
        let mut tracker = PositionTracker::new(5.0);
        let origin = Coordinate::new(53.55, 9.99);
        tracker.on_location_changed(origin);

        let far = meters_north(origin, 12.0);
        assert_eq!(tracker.on_location_changed(far), ReloadDecision::Reload);
        assert_eq!(tracker.user_state().previous_reload_location, Some(far));
    }

    #[test]
    fn test_threshold_is_strictly_greater_than() {
        let mut tracker = PositionTracker::new(100.0);
        let origin = Coordinate::new(0.0, 0.0);
        tracker.on_location_changed(origin);

        // Just inside the threshold: hold
        let inside = meters_north(origin, 99.0);
        assert_eq!(tracker.on_location_changed(inside), ReloadDecision::Hold);

        // Well beyond: reload (measured from the original anchor)
        let outside = meters_north(origin, 110.0);
        assert_eq!(tracker.on_location_changed(outside), ReloadDecision::Reload);
    }

    #[test]
    fn test_holds_accumulate_until_anchor_distance_exceeded() {
        // Each step is below the threshold, but drift accumulates against
        // the anchor, not the previous fix
        let mut tracker = PositionTracker::new(5.0);
        let origin = Coordinate::new(0.0, 0.0);
        tracker.on_location_changed(origin);

        let step1 = meters_north(origin, 3.0);
        let step2 = meters_north(origin, 6.0);

        assert_eq!(tracker.on_location_changed(step1), ReloadDecision::Hold);
        assert_eq!(tracker.on_location_changed(step2), ReloadDecision::Reload);
    }

    #[test]
    fn test_heading_updates_are_normalized() {
        let mut tracker = PositionTracker::default();
        assert_eq!(tracker.current_heading(), None);

        tracker.on_heading_changed(-90.0);
        assert_eq!(tracker.current_heading(), Some(270.0));

        tracker.on_heading_changed(365.0);
        assert_eq!(tracker.current_heading(), Some(5.0));
    }
}
