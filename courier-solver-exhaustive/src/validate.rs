//! Pre-flight checks that reject hopeless configurations before any
//! candidate is enumerated.

use courier_core::{CourierProfile, DeliveryPoint, DistanceModel, PlanError, travel_seconds};

/// Candidate ceiling used when none is configured: `11!`.
pub const DEFAULT_MAX_CANDIDATES: u64 = 39_916_800;

/// `n!`, or `None` when it does not fit in a `u64`.
///
/// # Examples
/// ```
/// use courier_solver_exhaustive::factorial;
///
/// assert_eq!(factorial(0), Some(1));
/// assert_eq!(factorial(5), Some(120));
/// assert_eq!(factorial(21), None);
/// ```
#[must_use]
pub fn factorial(n: usize) -> Option<u64> {
    (2..=n).try_fold(1_u64, |product, factor| {
        u64::try_from(factor)
            .ok()
            .and_then(|step| product.checked_mul(step))
    })
}

/// Runs the pre-flight checks in a fixed order; the first failure wins.
///
/// 1. Speed is finite and positive.
/// 2. There is one service time per point.
/// 3. No window closes before it opens.
/// 4. Every window overlaps the shift.
/// 5. Every point can be reached and left within the shift.
/// 6. `n!` does not exceed the candidate ceiling.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a, M> {
    model: &'a M,
    max_candidates: u64,
}

impl<'a, M: DistanceModel> Validator<'a, M> {
    /// Validate with `model` distances and a candidate ceiling.
    #[must_use]
    pub const fn new(model: &'a M, max_candidates: u64) -> Self {
        Self {
            model,
            max_candidates,
        }
    }

    /// Check the configuration, returning the number of candidate tours the
    /// search will simulate.
    ///
    /// # Errors
    /// Returns the [`PlanError`] for the first failed check.
    pub fn check(
        &self,
        courier: &CourierProfile,
        points: &[DeliveryPoint],
    ) -> Result<u64, PlanError> {
        let speed = courier.speed_kmh;
        if !(speed.is_finite() && speed > 0.0) {
            return Err(PlanError::InvalidSpeed { speed });
        }
        if courier.service_minutes.len() != points.len() {
            return Err(PlanError::ServiceTimeCountMismatch {
                points: points.len(),
                service_times: courier.service_minutes.len(),
            });
        }
        for point in points {
            check_window(courier, point)?;
        }
        for point in points {
            check_overlap(courier, point)?;
        }
        for point in points {
            self.check_reach(courier, point)?;
        }
        factorial(points.len())
            .filter(|candidates| *candidates <= self.max_candidates)
            .ok_or(PlanError::TooManyCandidates {
                points: points.len(),
                limit: self.max_candidates,
            })
    }

    fn check_reach(&self, courier: &CourierProfile, point: &DeliveryPoint) -> Result<(), PlanError> {
        let km = self.model.distance_km(courier.start, point.location);
        let round_trip_seconds = u64::from(travel_seconds(km, courier.speed_kmh)).saturating_mul(2);
        let shift_seconds = courier.shift.duration_seconds();
        if round_trip_seconds > u64::from(shift_seconds) {
            return Err(PlanError::PointTooFar {
                point_id: point.id,
                round_trip_seconds,
                shift_seconds,
            });
        }
        Ok(())
    }
}

fn check_window(courier: &CourierProfile, point: &DeliveryPoint) -> Result<(), PlanError> {
    let window = point.window;
    let (opens, closes) = courier.shift.anchor_window(window);
    if opens > closes {
        return Err(PlanError::InvertedWindow {
            point_id: point.id,
            from: window.from,
            to: window.to,
        });
    }
    Ok(())
}

fn check_overlap(courier: &CourierProfile, point: &DeliveryPoint) -> Result<(), PlanError> {
    let shift = courier.shift;
    let window = point.window;
    let (opens, closes) = shift.anchor_window(window);
    if shift.end() < opens {
        return Err(PlanError::ShiftEndsBeforeWindow {
            point_id: point.id,
            shift_end: shift.end(),
            window_from: window.from,
        });
    }
    if shift.start() > closes {
        return Err(PlanError::ShiftStartsAfterWindow {
            point_id: point.id,
            shift_start: shift.start(),
            window_to: window.to,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::Haversine;
    use courier_core::test_support::{courier, hm, point_with_window};
    use rstest::rstest;

    const TEN_KM_EAST: f64 = 0.09;

    fn check(courier: &CourierProfile, points: &[DeliveryPoint]) -> Result<u64, PlanError> {
        Validator::new(&Haversine, DEFAULT_MAX_CANDIDATES).check(courier, points)
    }

    fn day_courier(service: Vec<u32>) -> CourierProfile {
        courier(0.0, 0.0, 60.0, (8, 0), (18, 0), service)
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_unusable_speed(#[case] speed: f64) {
        let mut profile = day_courier(Vec::new());
        profile.speed_kmh = speed;
        let err = check(&profile, &[]).expect_err("speed must be rejected");
        assert!(matches!(err, PlanError::InvalidSpeed { .. }));
    }

    #[rstest]
    fn speed_is_checked_before_anything_else() {
        let mut profile = day_courier(vec![1, 2, 3]);
        profile.speed_kmh = 0.0;
        let points = [point_with_window(1, 170.0, 0.0, (20, 0), (19, 0))];
        let err = check(&profile, &points).expect_err("speed must be rejected");
        assert_eq!(err, PlanError::InvalidSpeed { speed: 0.0 });
    }

    #[rstest]
    fn rejects_mismatched_service_times() {
        let points = [point_with_window(1, TEN_KM_EAST, 0.0, (8, 0), (9, 0))];
        let err = check(&day_courier(vec![5, 5]), &points).expect_err("count mismatch");
        assert_eq!(
            err,
            PlanError::ServiceTimeCountMismatch {
                points: 1,
                service_times: 2,
            }
        );
    }

    #[rstest]
    fn rejects_inverted_window() {
        let points = [point_with_window(4, TEN_KM_EAST, 0.0, (10, 0), (9, 0))];
        let err = check(&day_courier(vec![0]), &points).expect_err("inverted window");
        assert_eq!(
            err,
            PlanError::InvertedWindow {
                point_id: 4,
                from: hm(10, 0),
                to: hm(9, 0),
            }
        );
    }

    #[rstest]
    fn rejects_window_after_shift() {
        let points = [point_with_window(2, TEN_KM_EAST, 0.0, (19, 0), (20, 0))];
        let err = check(&day_courier(vec![0]), &points).expect_err("window after shift");
        assert!(matches!(
            err,
            PlanError::ShiftEndsBeforeWindow { point_id: 2, .. }
        ));
    }

    #[rstest]
    fn rejects_window_before_shift() {
        let points = [point_with_window(3, TEN_KM_EAST, 0.0, (6, 0), (7, 0))];
        let err = check(&day_courier(vec![0]), &points).expect_err("window before shift");
        assert_eq!(
            err.to_string(),
            "shift starts at 08:00:00, after point [3] closes at 07:00:00"
        );
    }

    #[rstest]
    fn accepts_window_touching_shift_bounds() {
        let points = [
            point_with_window(1, TEN_KM_EAST, 0.0, (6, 0), (8, 0)),
            point_with_window(2, TEN_KM_EAST, 0.0, (18, 0), (19, 0)),
        ];
        assert_eq!(check(&day_courier(vec![0, 0]), &points), Ok(2));
    }

    #[rstest]
    fn rejects_point_beyond_round_trip_reach() {
        // 600 km each way at 60 km/h is 20 h there and back.
        let points = [point_with_window(9, 5.4, 0.0, (8, 0), (18, 0))];
        let err = check(&day_courier(vec![0]), &points).expect_err("too far");
        let PlanError::PointTooFar {
            point_id,
            round_trip_seconds,
            shift_seconds,
        } = err
        else {
            panic!("expected PointTooFar, got {err:?}");
        };
        assert_eq!(point_id, 9);
        assert_eq!(shift_seconds, 36_000);
        assert!(round_trip_seconds > u64::from(shift_seconds));
    }

    #[rstest]
    fn midnight_shift_accepts_early_morning_window() {
        let profile = courier(0.0, 0.0, 60.0, (22, 0), (6, 0), vec![0]);
        let points = [point_with_window(1, TEN_KM_EAST, 0.0, (1, 0), (2, 0))];
        assert_eq!(check(&profile, &points), Ok(1));
    }

    #[rstest]
    #[case::before_midnight((23, 0), (23, 59))]
    #[case::wrapping_midnight((22, 0), (1, 0))]
    fn midnight_shift_accepts_late_evening_windows(
        #[case] from: (u32, u32),
        #[case] to: (u32, u32),
    ) {
        let profile = courier(0.0, 0.0, 60.0, (23, 30), (2, 0), vec![0]);
        let points = [point_with_window(1, TEN_KM_EAST, 0.0, from, to)];
        assert_eq!(check(&profile, &points), Ok(1));
    }

    #[rstest]
    fn enforces_candidate_ceiling() {
        let points: Vec<DeliveryPoint> = (1..=4)
            .map(|id| point_with_window(id, TEN_KM_EAST, 0.0, (8, 0), (18, 0)))
            .collect();
        let profile = day_courier(vec![0; 4]);
        let err = Validator::new(&Haversine, 23)
            .check(&profile, &points)
            .expect_err("24 candidates exceed 23");
        assert_eq!(
            err,
            PlanError::TooManyCandidates {
                points: 4,
                limit: 23,
            }
        );
        assert_eq!(Validator::new(&Haversine, 24).check(&profile, &points), Ok(24));
    }

    #[rstest]
    #[case(0, Some(1))]
    #[case(1, Some(1))]
    #[case(11, Some(DEFAULT_MAX_CANDIDATES))]
    #[case(20, Some(2_432_902_008_176_640_000))]
    #[case(21, None)]
    fn factorial_checks_overflow(#[case] n: usize, #[case] expected: Option<u64>) {
        assert_eq!(factorial(n), expected);
    }
}
