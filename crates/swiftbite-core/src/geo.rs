//! # Distance / ETA Estimation
//!
//! Pure geo math: great-circle distance between two coordinates and a coarse
//! travel-time estimate from an assumed average speed per travel mode.
//!
//! The estimate is explicitly a placeholder — straight-line distance standing
//! in for road distance — kept behind a stable signature so a real routing
//! provider can be substituted without touching callers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{validate_latitude, validate_longitude};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

// =============================================================================
// GeoPoint
// =============================================================================

/// A latitude/longitude pair in floating-point degrees. Value type, no
/// identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point, rejecting coordinates outside −90..=90 / −180..=180.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        validate_latitude(latitude)?;
        validate_longitude(longitude)?;
        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }
}

// =============================================================================
// Travel Mode
// =============================================================================

/// How the distance will be covered; selects the assumed average speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    Bicycling,
    Driving,
}

impl TravelMode {
    /// Assumed average speed in km/h. Driving uses an urban average.
    pub const fn speed_kmh(&self) -> f64 {
        match self {
            TravelMode::Walking => 5.0,
            TravelMode::Bicycling => 15.0,
            TravelMode::Driving => 30.0,
        }
    }

    /// Lenient parse for mode strings coming from the frontend; anything
    /// unrecognized falls back to driving rather than failing the estimate.
    pub fn parse_or_driving(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "walking" => TravelMode::Walking,
            "bicycling" => TravelMode::Bicycling,
            _ => TravelMode::Driving,
        }
    }
}

impl Default for TravelMode {
    fn default() -> Self {
        TravelMode::Driving
    }
}

// =============================================================================
// Estimators
// =============================================================================

/// Great-circle distance between two points in kilometers (Haversine).
///
/// Symmetric in its arguments and zero for identical points. The haversine
/// term is clamped to [0, 1] so float drift near antipodal points cannot
/// push the square root out of domain.
pub fn haversine_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Coarse travel time between two points in whole minutes.
///
/// Straight-line distance divided by the mode's assumed average speed,
/// rounded to the nearest minute. Not a routing-engine output.
pub fn estimate_travel_time_minutes(a: GeoPoint, b: GeoPoint, mode: TravelMode) -> i64 {
    let distance_km = haversine_distance_km(a, b);
    let minutes = distance_km / mode.speed_kmh() * 60.0;
    minutes.round() as i64
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SF: (f64, f64) = (37.7749, -122.4194);
    const LA: (f64, f64) = (34.0522, -118.2437);

    fn point(coords: (f64, f64)) -> GeoPoint {
        GeoPoint::new(coords.0, coords.1).unwrap()
    }

    #[test]
    fn test_identical_points_are_zero_distance() {
        let p = point(SF);
        assert_eq!(haversine_distance_km(p, p), 0.0);
        assert_eq!(estimate_travel_time_minutes(p, p, TravelMode::Driving), 0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let d1 = haversine_distance_km(point(SF), point(LA));
        let d2 = haversine_distance_km(point(LA), point(SF));
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_known_distance_sf_to_la() {
        // Great-circle SF → LA is roughly 559 km
        let d = haversine_distance_km(point(SF), point(LA));
        assert!((d - 559.0).abs() < 5.0, "got {}", d);
    }

    #[test]
    fn test_antipodal_points_do_not_panic() {
        let a = point((0.0, 0.0));
        let b = point((0.0, 180.0));
        let d = haversine_distance_km(a, b);
        // Half the Earth's circumference at the equator, ~20015 km
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1.0);
        assert!(d.is_finite());
    }

    #[test]
    fn test_walking_never_faster_than_driving() {
        let a = point(SF);
        let b = point(LA);
        let walking = estimate_travel_time_minutes(a, b, TravelMode::Walking);
        let driving = estimate_travel_time_minutes(a, b, TravelMode::Driving);
        assert!(walking >= driving);
        assert!(walking > 0);
    }

    #[test]
    fn test_eta_scales_with_speed() {
        // ~1.11 km due north of the equator origin
        let a = point((0.0, 0.0));
        let b = point((0.01, 0.0));
        let d = haversine_distance_km(a, b);

        for mode in [TravelMode::Walking, TravelMode::Bicycling, TravelMode::Driving] {
            let expected = (d / mode.speed_kmh() * 60.0).round() as i64;
            assert_eq!(estimate_travel_time_minutes(a, b, mode), expected);
        }
    }

    #[test]
    fn test_mode_parsing_falls_back_to_driving() {
        assert_eq!(TravelMode::parse_or_driving("walking"), TravelMode::Walking);
        assert_eq!(
            TravelMode::parse_or_driving("Bicycling"),
            TravelMode::Bicycling
        );
        assert_eq!(TravelMode::parse_or_driving("driving"), TravelMode::Driving);
        assert_eq!(TravelMode::parse_or_driving("teleport"), TravelMode::Driving);
        assert_eq!(TravelMode::default(), TravelMode::Driving);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(90.1, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.5).is_err());
    }
}
