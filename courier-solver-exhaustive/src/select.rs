//! Running optima for the three objectives.

use courier_core::{Diagnostics, Objective, PlanResponse, RouteSummary, TimeOfDay};

use crate::Timeline;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Incumbent<K> {
    key: K,
    summary: RouteSummary,
}

fn beats<K: Ord>(incumbent: Option<&Incumbent<K>>, key: &K) -> bool {
    incumbent.is_none_or(|current| *key < current.key)
}

/// Keeps the best feasible tour seen so far for each [`Objective`].
///
/// A candidate replaces an incumbent only when it is strictly better, so
/// ties go to the tour offered first.
///
/// # Examples
/// ```
/// use courier_core::{Objective, RouteSummary, TimeOfDay};
/// use courier_solver_exhaustive::{Selector, Timeline};
///
/// let summary = |km| RouteSummary {
///     legs: Vec::new(),
///     total_distance_km: km,
///     drive_seconds: 0,
///     wait_seconds: 0,
///     total_seconds: 0,
///     finish: TimeOfDay::MIDNIGHT,
/// };
/// let timeline = |km| Timeline {
///     total_km: km,
///     drive_seconds: 0,
///     wait_seconds: 0,
///     finish: TimeOfDay::MIDNIGHT,
/// };
///
/// let mut selector = Selector::new();
/// selector.offer(&timeline(12), || summary(12));
/// selector.offer(&timeline(9), || summary(9));
/// selector.offer(&timeline(9), || summary(99));
/// assert_eq!(selector.best(Objective::Distance).map(|s| s.total_distance_km), Some(9));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    distance: Option<Incumbent<u32>>,
    wait: Option<Incumbent<u32>>,
    finish: Option<Incumbent<TimeOfDay>>,
    feasible: u64,
}

impl Selector {
    /// A selector with no winners.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            distance: None,
            wait: None,
            finish: None,
            feasible: 0,
        }
    }

    /// Consider a feasible tour.
    ///
    /// `summarize` runs only when the tour beats at least one incumbent.
    pub fn offer<F>(&mut self, timeline: &Timeline, summarize: F)
    where
        F: FnOnce() -> RouteSummary,
    {
        self.feasible = self.feasible.saturating_add(1);
        let shorter = beats(self.distance.as_ref(), &timeline.total_km);
        let calmer = beats(self.wait.as_ref(), &timeline.wait_seconds);
        let earlier = beats(self.finish.as_ref(), &timeline.finish);
        if !(shorter || calmer || earlier) {
            return;
        }
        let summary = summarize();
        if shorter {
            self.distance = Some(Incumbent {
                key: timeline.total_km,
                summary: summary.clone(),
            });
        }
        if calmer {
            self.wait = Some(Incumbent {
                key: timeline.wait_seconds,
                summary: summary.clone(),
            });
        }
        if earlier {
            self.finish = Some(Incumbent {
                key: timeline.finish,
                summary,
            });
        }
    }

    /// Fold in the winners of a selector that saw later candidates.
    ///
    /// Merging partitions in enumeration order gives the same winners as
    /// offering every candidate to one selector.
    pub fn merge(&mut self, later: Self) {
        if let Some(candidate) = later.distance
            && beats(self.distance.as_ref(), &candidate.key)
        {
            self.distance = Some(candidate);
        }
        if let Some(candidate) = later.wait
            && beats(self.wait.as_ref(), &candidate.key)
        {
            self.wait = Some(candidate);
        }
        if let Some(candidate) = later.finish
            && beats(self.finish.as_ref(), &candidate.key)
        {
            self.finish = Some(candidate);
        }
        self.feasible = self.feasible.saturating_add(later.feasible);
    }

    /// The current winner for `objective`.
    #[must_use]
    pub fn best(&self, objective: Objective) -> Option<&RouteSummary> {
        match objective {
            Objective::Distance => self.distance.as_ref().map(|i| &i.summary),
            Objective::Wait => self.wait.as_ref().map(|i| &i.summary),
            Objective::Finish => self.finish.as_ref().map(|i| &i.summary),
        }
    }

    /// Number of feasible tours offered.
    #[must_use]
    pub const fn feasible(&self) -> u64 {
        self.feasible
    }

    /// Convert into a response carrying the winners and the feasible count.
    #[must_use]
    pub fn into_response(self) -> PlanResponse {
        PlanResponse {
            best_distance: self.distance.map(|i| i.summary),
            best_wait: self.wait.map(|i| i.summary),
            best_finish: self.finish.map(|i| i.summary),
            diagnostics: Diagnostics {
                feasible_candidates: self.feasible,
                ..Diagnostics::default()
            },
            rejections: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn timeline(km: u32, wait: u32, finish: u32) -> Timeline {
        Timeline {
            total_km: km,
            drive_seconds: 0,
            wait_seconds: wait,
            finish: TimeOfDay::from_seconds(finish),
        }
    }

    // The tag rides in `drive_seconds` so tests can tell summaries apart.
    fn tagged(tag: u32) -> RouteSummary {
        RouteSummary {
            legs: Vec::new(),
            total_distance_km: 0,
            drive_seconds: tag,
            wait_seconds: 0,
            total_seconds: 0,
            finish: TimeOfDay::MIDNIGHT,
        }
    }

    fn winner(selector: &Selector, objective: Objective) -> Option<u32> {
        selector.best(objective).map(|s| s.drive_seconds)
    }

    #[fixture]
    fn selector() -> Selector {
        Selector::new()
    }

    #[rstest]
    fn empty_selector_has_no_winners(selector: Selector) {
        let response = selector.into_response();
        assert!(!response.has_feasible_route());
        assert_eq!(response.diagnostics.feasible_candidates, 0);
    }

    #[rstest]
    fn objectives_are_tracked_independently(mut selector: Selector) {
        selector.offer(&timeline(10, 500, 40_000), || tagged(1));
        selector.offer(&timeline(8, 900, 41_000), || tagged(2));
        selector.offer(&timeline(12, 100, 42_000), || tagged(3));
        selector.offer(&timeline(20, 800, 39_000), || tagged(4));

        assert_eq!(winner(&selector, Objective::Distance), Some(2));
        assert_eq!(winner(&selector, Objective::Wait), Some(3));
        assert_eq!(winner(&selector, Objective::Finish), Some(4));
        assert_eq!(selector.feasible(), 4);
    }

    #[rstest]
    fn ties_keep_the_first_offer(mut selector: Selector) {
        selector.offer(&timeline(10, 10, 100), || tagged(1));
        selector.offer(&timeline(10, 10, 100), || tagged(2));
        for objective in Objective::ALL {
            assert_eq!(winner(&selector, objective), Some(1));
        }
    }

    #[rstest]
    fn summaries_are_built_only_on_improvement(mut selector: Selector) {
        let mut built = 0;
        for _ in 0..3 {
            selector.offer(&timeline(10, 10, 100), || {
                built += 1;
                tagged(built)
            });
        }
        assert_eq!(built, 1);
    }

    #[rstest]
    fn merge_prefers_earlier_partition_on_ties(mut selector: Selector) {
        selector.offer(&timeline(10, 50, 200), || tagged(1));
        let mut later = Selector::new();
        later.offer(&timeline(10, 40, 200), || tagged(2));

        selector.merge(later);
        assert_eq!(winner(&selector, Objective::Distance), Some(1));
        assert_eq!(winner(&selector, Objective::Wait), Some(2));
        assert_eq!(winner(&selector, Objective::Finish), Some(1));
        assert_eq!(selector.feasible(), 2);
    }

    #[rstest]
    fn merge_into_empty_takes_everything(mut selector: Selector) {
        let mut later = Selector::new();
        later.offer(&timeline(3, 4, 5), || tagged(7));
        selector.merge(later.clone());
        assert_eq!(selector, later);
    }
}
