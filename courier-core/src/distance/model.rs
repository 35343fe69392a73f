//! Haversine distance and travel-time conversion.

use geo::Coord;

/// Mean earth radius used by [`Haversine`].
pub const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

const METRES_PER_KILOMETRE: f64 = 1_000.0;
const KMH_PER_METRE_PER_SECOND: f64 = 3.6;

/// Distance in whole kilometres between two WGS84 coordinates.
///
/// Implementations must be symmetric and return `0` for identical inputs.
pub trait DistanceModel {
    /// Kilometres from `from` to `to`.
    fn distance_km(&self, from: Coord<f64>, to: Coord<f64>) -> u32;
}

/// Great-circle distance on a sphere of radius [`EARTH_RADIUS_METRES`],
/// rounded half-up to the nearest kilometre.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use courier_core::{DistanceModel, Haversine};
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let east = Coord { x: 0.09, y: 0.0 };
/// assert_eq!(Haversine.distance_km(origin, east), 10);
/// assert_eq!(Haversine.distance_km(east, origin), 10);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Haversine;

impl DistanceModel for Haversine {
    fn distance_km(&self, from: Coord<f64>, to: Coord<f64>) -> u32 {
        let d_lat = (to.y - from.y).to_radians();
        let d_lon = (to.x - from.x).to_radians();
        let half_lat = (d_lat / 2.0).sin();
        let half_lon = (d_lon / 2.0).sin();
        let raw = half_lat * half_lat
            + from.y.to_radians().cos() * to.y.to_radians().cos() * half_lon * half_lon;
        // Rounding noise can push the haversine above one for antipodal points.
        let a = raw.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        (EARTH_RADIUS_METRES * c / METRES_PER_KILOMETRE).round() as u32
    }
}

/// Seconds needed to drive `km` kilometres at `speed_kmh`.
///
/// The result is truncated, not rounded, so chained legs may lose up to a
/// second each. A non-positive speed yields `u32::MAX`.
///
/// # Examples
/// ```
/// use courier_core::travel_seconds;
///
/// assert_eq!(travel_seconds(10, 60.0), 600);
/// assert_eq!(travel_seconds(1, 7.0), 514);
/// assert_eq!(travel_seconds(0, 30.0), 0);
/// ```
pub fn travel_seconds(km: u32, speed_kmh: f64) -> u32 {
    if speed_kmh <= 0.0 || speed_kmh.is_nan() {
        return u32::MAX;
    }
    let metres_per_second = speed_kmh / KMH_PER_METRE_PER_SECOND;
    // Float-to-int casts saturate; truncation is the intended rounding.
    (f64::from(km) * METRES_PER_KILOMETRE / metres_per_second) as u32
}
