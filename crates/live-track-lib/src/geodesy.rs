//! Great-circle distance and unit conversions

use crate::PositionFix;
use geo::Point;

/// Mean Earth radius in kilometers, as used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Conversion factor from meters per second to kilometers per hour
pub const MPS_TO_KMH: f64 = 3.6;

/// Calculate the great-circle distance between two WGS84 points in kilometers
///
/// # Arguments
/// * `a` - First point (x = longitude, y = latitude, in degrees)
/// * `b` - Second point (x = longitude, y = latitude, in degrees)
///
/// # Returns
/// The haversine surface distance in kilometers. Always non-negative and
/// finite for finite input; sub-meter error for the short segments produced
/// by pedestrian-speed tracking.
#[inline]
pub fn haversine_distance_km(a: Point<f64>, b: Point<f64>) -> f64 {
    let lat1 = a.y().to_radians();
    let lat2 = b.y().to_radians();
    let delta_lat = (b.y() - a.y()).to_radians();
    let delta_lon = (b.x() - a.x()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Calculate the distance covered between two consecutive position fixes in kilometers
#[inline]
pub fn segment_distance_km(a: &PositionFix, b: &PositionFix) -> f64 {
    haversine_distance_km(a.point(), b.point())
}

/// Convert an instantaneous speed from m/s to km/h
#[inline]
pub fn mps_to_kmh(speed_mps: f64) -> f64 {
    speed_mps * MPS_TO_KMH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_identity() {
        let p = Point::new(-0.1278, 51.5074);
        assert_eq!(haversine_distance_km(p, p), 0.0);
    }

    #[test]
    fn test_haversine_symmetry() {
        let a = Point::new(-0.1278, 51.5074);
        let b = Point::new(2.3522, 48.8566);
        let ab = haversine_distance_km(a, b);
        let ba = haversine_distance_km(b, a);
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn test_haversine_known_one_km_pair() {
        // One kilometer of longitude at the equator is ~0.008993 degrees
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.008993, 0.0);
        let d = haversine_distance_km(a, b);
        assert!((d - 1.0).abs() < 0.001, "distance was {d}");
    }

    #[test]
    fn test_haversine_london_paris() {
        // ~343 km between the two city centers
        let london = Point::new(-0.1278, 51.5074);
        let paris = Point::new(2.3522, 48.8566);
        let d = haversine_distance_km(london, paris);
        assert!(d > 330.0 && d < 350.0, "distance was {d}");
    }

    #[test]
    fn test_haversine_non_negative_and_finite() {
        let pairs = [
            ((0.0, 0.0), (180.0, 0.0)),
            ((-180.0, -85.0), (180.0, 85.0)),
            ((10.0, 89.9), (-170.0, 89.9)),
        ];
        for ((ax, ay), (bx, by)) in pairs {
            let d = haversine_distance_km(Point::new(ax, ay), Point::new(bx, by));
            assert!(d.is_finite());
            assert!(d >= 0.0);
        }
    }

    #[test]
    fn test_mps_to_kmh() {
        assert!((mps_to_kmh(1.0) - 3.6).abs() < f64::EPSILON);
        assert!((mps_to_kmh(2.5) - 9.0).abs() < 1e-12);
        assert_eq!(mps_to_kmh(0.0), 0.0);
    }
}
