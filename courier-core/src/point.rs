use geo::Coord;

use crate::TimeOfDay;

/// The interval during which a delivery point accepts the courier.
///
/// Both bounds are inclusive: arriving exactly at `to` is still on time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryWindow {
    /// Earliest instant service may begin.
    pub from: TimeOfDay,
    /// Latest acceptable arrival.
    pub to: TimeOfDay,
}

impl DeliveryWindow {
    /// Construct a window from its bounds.
    ///
    /// # Examples
    /// ```
    /// use courier_core::{DeliveryWindow, TimeOfDay};
    ///
    /// let window = DeliveryWindow::new(
    ///     TimeOfDay::from_seconds(30_600),
    ///     TimeOfDay::from_seconds(34_200),
    /// );
    /// assert_eq!(window.to.to_string(), "09:30:00");
    /// ```
    pub const fn new(from: TimeOfDay, to: TimeOfDay) -> Self {
        Self { from, to }
    }
}

/// A stop the courier must visit exactly once.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use courier_core::{DeliveryPoint, DeliveryWindow, TimeOfDay};
///
/// let window = DeliveryWindow::new(TimeOfDay::MIDNIGHT, TimeOfDay::from_seconds(3_600));
/// let point = DeliveryPoint::new(7, Coord { x: 13.4, y: 52.5 }, window);
///
/// assert_eq!(point.id, 7);
/// assert_eq!(point.latitude(), 52.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryPoint {
    /// Unique identifier.
    pub id: u64,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// When the point accepts deliveries.
    pub window: DeliveryWindow,
}

impl DeliveryPoint {
    /// Construct a delivery point.
    pub const fn new(id: u64, location: Coord<f64>, window: DeliveryWindow) -> Self {
        Self {
            id,
            location,
            window,
        }
    }

    /// Latitude in degrees.
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_exposes_lat_lon() {
        let window = DeliveryWindow::new(TimeOfDay::MIDNIGHT, TimeOfDay::MIDNIGHT);
        let point = DeliveryPoint::new(1, Coord { x: 2.0, y: 48.0 }, window);
        assert_eq!(point.longitude(), 2.0);
        assert_eq!(point.latitude(), 48.0);
    }
}
