//! The courier's starting position, speed, shift and per-stop service times.

use geo::Coord;

use crate::Shift;

const SECONDS_PER_MINUTE: u32 = 60;

/// How the courier's service-time list maps onto stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ServiceTimeBinding {
    /// The i-th visited stop uses the i-th entry, whichever point it is.
    #[default]
    VisitPosition,
    /// The k-th entry belongs to the k-th point in store order and travels
    /// with that point whatever position it is visited in.
    PointIdentity,
}

/// Everything the planner needs to know about the courier.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use courier_core::{CourierProfile, Shift, TimeOfDay};
///
/// let shift = Shift::new(TimeOfDay::from_seconds(28_800), TimeOfDay::from_seconds(64_800));
/// let courier = CourierProfile::new(Coord { x: 0.0, y: 0.0 }, 60.0, shift, vec![10, 5]);
///
/// assert_eq!(courier.service_seconds(0), Some(600));
/// assert_eq!(courier.service_seconds(2), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CourierProfile {
    /// Where the courier starts and must return to.
    pub start: Coord<f64>,
    /// Constant travel speed in km/h.
    pub speed_kmh: f64,
    /// The work day.
    pub shift: Shift,
    /// Minutes spent at each stop.
    pub service_minutes: Vec<u32>,
}

impl CourierProfile {
    /// Construct a courier profile.
    pub const fn new(
        start: Coord<f64>,
        speed_kmh: f64,
        shift: Shift,
        service_minutes: Vec<u32>,
    ) -> Self {
        Self {
            start,
            speed_kmh,
            shift,
            service_minutes,
        }
    }

    /// Service time in seconds for entry `index`, if present.
    pub fn service_seconds(&self, index: usize) -> Option<u32> {
        self.service_minutes
            .get(index)
            .map(|minutes| minutes.saturating_mul(SECONDS_PER_MINUTE))
    }
}
