//! Builders for delivery points and couriers used by unit and behaviour
//! tests.

use geo::Coord;

use crate::{CourierProfile, DeliveryPoint, DeliveryWindow, Shift, TimeOfDay};

/// Construct a [`TimeOfDay`] from whole hours and minutes.
///
/// # Panics
/// Panics when the hour or minute is out of range.
pub fn hm(hour: u32, minute: u32) -> TimeOfDay {
    TimeOfDay::from_hms(hour, minute, 0).unwrap_or_else(|err| panic!("{err}"))
}

/// A delivery point whose window spans the whole day.
pub fn point(id: u64, lon: f64, lat: f64) -> DeliveryPoint {
    point_with_window(id, lon, lat, (0, 0), (23, 59))
}

/// A delivery point open from `from` to `to`, each given as `(hour, minute)`.
pub fn point_with_window(
    id: u64,
    lon: f64,
    lat: f64,
    from: (u32, u32),
    to: (u32, u32),
) -> DeliveryPoint {
    DeliveryPoint::new(
        id,
        Coord { x: lon, y: lat },
        DeliveryWindow::new(hm(from.0, from.1), hm(to.0, to.1)),
    )
}

/// A courier at `(lon, lat)` working `start` to `end` with the given
/// service minutes.
pub fn courier(
    lon: f64,
    lat: f64,
    speed_kmh: f64,
    start: (u32, u32),
    end: (u32, u32),
    service_minutes: Vec<u32>,
) -> CourierProfile {
    CourierProfile::new(
        Coord { x: lon, y: lat },
        speed_kmh,
        Shift::new(hm(start.0, start.1), hm(end.0, end.1)),
        service_minutes,
    )
}
