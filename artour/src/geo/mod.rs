//! Geodesic math module
//!
//! Pure functions converting between geographic coordinates and the local
//! tangent-plane positions used to place AR markers around the user:
//! great-circle bearing, haversine distance and flat-earth projection.
//!
//! All functions are total for finite inputs - there are no failure modes
//! and no state.

mod types;

pub use types::{Coordinate, LocalPosition, EARTH_RADIUS_M, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Initial great-circle bearing from one coordinate to another.
///
/// Uses the standard spherical bearing formula. The result is degrees
/// clockwise from geographic north, normalized into [0, 360).
#[inline]
pub fn bearing(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    normalize_bearing(y.atan2(x).to_degrees())
}

/// Great-circle distance between two coordinates in meters.
///
/// Haversine formula with Earth radius [`EARTH_RADIUS_M`].
#[inline]
pub fn distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Project a target coordinate into the local tangent plane around an origin.
///
/// `x = distance * sin(bearing)` (east), `z = distance * cos(bearing)`
/// (north), `y = 0`. See [`LocalPosition`] for the sign convention.
#[inline]
pub fn local_position(origin: &Coordinate, target: &Coordinate) -> LocalPosition {
    let d = distance(origin, target);
    let theta = bearing(origin, target).to_radians();
    LocalPosition::new(d * theta.sin(), d * theta.cos())
}

/// Normalize a bearing in degrees into [0, 360).
#[inline]
pub fn normalize_bearing(degrees: f64) -> f64 {
    let normalized = degrees % 360.0;
    if normalized < 0.0 {
        normalized + 360.0
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One degree of latitude is ~111.19 km on the spherical model.
    const ONE_DEGREE_NORTH_M: f64 = 111_195.0;

    #[test]
    fn test_distance_is_symmetric() {
        let hamburg = Coordinate::new(53.5511, 9.9937);
        let toulouse = Coordinate::new(43.6047, 1.4442);

        let there = distance(&hamburg, &toulouse);
        let back = distance(&toulouse, &hamburg);

        assert!((there - back).abs() < 1e-6, "d(A,B) should equal d(B,A)");
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let c = Coordinate::new(48.8566, 2.3522);
        assert_eq!(distance(&c, &c), 0.0);
    }

    #[test]
    fn test_distance_one_degree_north() {
        // Two coordinates ~111km apart along a pure north line
        let origin = Coordinate::new(0.0, 0.0);
        let north = Coordinate::new(1.0, 0.0);

        let d = distance(&origin, &north);
        let error = (d - ONE_DEGREE_NORTH_M).abs() / ONE_DEGREE_NORTH_M;
        assert!(
            error < 0.01,
            "distance {} should be within 1% of {}",
            d,
            ONE_DEGREE_NORTH_M
        );
    }

    #[test]
    fn test_bearing_due_north() {
        let origin = Coordinate::new(0.0, 0.0);
        let north = Coordinate::new(1.0, 0.0);
        assert!(bearing(&origin, &north).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Coordinate::new(0.0, 0.0);

        let east = bearing(&origin, &Coordinate::new(0.0, 1.0));
        let south = bearing(&origin, &Coordinate::new(-1.0, 0.0));
        let west = bearing(&origin, &Coordinate::new(0.0, -1.0));

        assert!((east - 90.0).abs() < 1e-9);
        assert!((south - 180.0).abs() < 1e-9);
        assert!((west - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_always_in_range() {
        let origin = Coordinate::new(53.5511, 9.9937);
        let targets = [
            Coordinate::new(53.6, 9.9),
            Coordinate::new(53.5, 10.1),
            Coordinate::new(53.4, 9.8),
            Coordinate::new(-33.8688, 151.2093),
            Coordinate::new(40.7128, -74.0060),
        ];

        for target in &targets {
            let b = bearing(&origin, target);
            assert!(
                (0.0..360.0).contains(&b),
                "bearing {} to {} out of [0, 360)",
                b,
                target
            );
        }
    }

    #[test]
    fn test_local_position_north_target() {
        let origin = Coordinate::new(0.0, 0.0);
        let north = Coordinate::new(0.001, 0.0);

        let p = local_position(&origin, &north);
        assert!(p.x.abs() < 1e-6, "due-north target should have x ~ 0");
        assert!(p.z > 100.0, "due-north target should be ~111m north");
    }

    #[test]
    fn test_local_position_east_is_positive_x() {
        let origin = Coordinate::new(0.0, 0.0);
        let east = Coordinate::new(0.0, 0.001);

        let p = local_position(&origin, &east);
        assert!(p.x > 100.0, "due-east target should have positive x");
        assert!(p.z.abs() < 1.0, "due-east target should have z ~ 0");
    }

    #[test]
    fn test_local_position_range_matches_distance() {
        let origin = Coordinate::new(53.5511, 9.9937);
        let target = Coordinate::new(53.5530, 9.9970);

        let p = local_position(&origin, &target);
        let d = distance(&origin, &target);
        assert!(
            (p.range() - d).abs() < 0.01,
            "projected range {} should match geodesic distance {}",
            p.range(),
            d
        );
    }

    #[test]
    fn test_normalize_bearing() {
        assert_eq!(normalize_bearing(0.0), 0.0);
        assert_eq!(normalize_bearing(359.9), 359.9);
        assert_eq!(normalize_bearing(360.0), 0.0);
        assert_eq!(normalize_bearing(-90.0), 270.0);
        assert_eq!(normalize_bearing(725.0), 5.0);
    }
}
