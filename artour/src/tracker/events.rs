//! Typed sensor events
//!
//! The location/heading service delivers its callbacks as values on a
//! channel rather than dynamic closures, so the engine can process them
//! strictly in arrival order on its own task.

use crate::geo::Coordinate;

/// An event pushed by the location/heading sensor service.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorEvent {
    /// The device position changed.
    LocationChanged(Coordinate),

    /// The device heading changed (degrees clockwise from north).
    HeadingChanged(f32),

    /// The sensor service reported a failure. No detail structure is
    /// guaranteed by the platform, so this carries a plain message.
    SensorFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_comparable() {
        let a = SensorEvent::LocationChanged(Coordinate::new(1.0, 2.0));
        let b = SensorEvent::LocationChanged(Coordinate::new(1.0, 2.0));
        assert_eq!(a, b);
        assert_ne!(a, SensorEvent::HeadingChanged(90.0));
    }
}
