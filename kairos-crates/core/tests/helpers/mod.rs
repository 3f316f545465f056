//! Random instances and exhaustive enumeration shared by the integration tests.
#![allow(
    dead_code,
    reason = "every test file uses a different subset of the helpers"
)]

use itertools::Itertools;
use kairos_core::engine::propagation::ReadDomains;
use kairos_core::engine::variables::DomainId;
use kairos_core::engine::EmptyDomain;
use kairos_core::engine::State;
use kairos_core::propagators::cumulative::Activity;
use rand::rngs::SmallRng;
use rand::Rng;

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The initial bounds of an activity before it is turned into variables.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ActivityBounds {
    pub(crate) start_min: i32,
    pub(crate) end_max: i32,
    pub(crate) length_min: i32,
    pub(crate) length_max: i32,
    pub(crate) height_min: i32,
    pub(crate) height_max: i32,
    pub(crate) optional: bool,
}

impl ActivityBounds {
    pub(crate) fn random(rng: &mut SmallRng, horizon: i32, max_height: i32) -> Self {
        ActivityBounds::random_with_heights(rng, horizon, 0, max_height)
    }

    /// A random activity whose height lies in `[min_height, max_height]`; a negative height makes
    /// the activity a producer.
    pub(crate) fn random_with_heights(
        rng: &mut SmallRng,
        horizon: i32,
        min_height: i32,
        max_height: i32,
    ) -> Self {
        let length_min = rng.gen_range(0..=2);
        let length_max = length_min + rng.gen_range(0..=1);
        let start_min = rng.gen_range(0..=horizon - length_min);
        let end_max = rng.gen_range(start_min + length_min..=horizon);
        let height_min = rng.gen_range(min_height..=max_height);
        let height_max = (height_min + rng.gen_range(0..=1)).min(max_height);

        ActivityBounds {
            start_min,
            end_max,
            length_min,
            length_max,
            height_min,
            height_max,
            optional: rng.gen_bool(0.3),
        }
    }

    pub(crate) fn create(&self, state: &mut State) -> Activity<DomainId> {
        let interval = if self.optional {
            state.new_optional_interval_variable(
                self.start_min,
                self.end_max,
                self.length_min,
                self.length_max,
            )
        } else {
            state.new_interval_variable(
                self.start_min,
                self.end_max,
                self.length_min,
                self.length_max,
            )
        };
        let height = state.new_bounded_integer(self.height_min, self.height_max);
        Activity::new(interval, height)
    }

    /// Every way to realise the activity; `None` stands for the activity being absent.
    pub(crate) fn placements(&self) -> Vec<Option<Placement>> {
        let mut placements = Vec::new();
        if self.optional {
            placements.push(None);
        }
        for start in self.start_min..=self.end_max - self.length_min {
            for length in self.length_min..=self.length_max.min(self.end_max - start) {
                for height in self.height_min..=self.height_max {
                    placements.push(Some(Placement {
                        start,
                        length,
                        height,
                    }));
                }
            }
        }
        placements
    }
}

/// A present activity with all of its values fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Placement {
    pub(crate) start: i32,
    pub(crate) length: i32,
    pub(crate) height: i32,
}

impl Placement {
    pub(crate) fn end(&self) -> i32 {
        self.start + self.length
    }

    pub(crate) fn runs_at(&self, time: i32) -> bool {
        self.start <= time && time < self.end()
    }
}

/// The values an activity takes over all solutions.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Support {
    pub(crate) can_be_absent: bool,
    pub(crate) present: Option<PresentSupport>,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PresentSupport {
    pub(crate) start: (i32, i32),
    pub(crate) end: (i32, i32),
    pub(crate) length: (i32, i32),
    pub(crate) height: (i32, i32),
}

fn widen((min, max): (i32, i32), value: i32) -> (i32, i32) {
    (min.min(value), max.max(value))
}

impl Support {
    fn add(&mut self, placement: Option<&Placement>) {
        let Some(placement) = placement else {
            self.can_be_absent = true;
            return;
        };

        let single = |value: i32| (value, value);
        self.present = Some(match self.present {
            None => PresentSupport {
                start: single(placement.start),
                end: single(placement.end()),
                length: single(placement.length),
                height: single(placement.height),
            },
            Some(support) => PresentSupport {
                start: widen(support.start, placement.start),
                end: widen(support.end, placement.end()),
                length: widen(support.length, placement.length),
                height: widen(support.height, placement.height),
            },
        });
    }
}

/// Enumerates every combination of placements and collects, per activity, the values it takes in
/// the combinations accepted by `is_solution`. Returns `None` if no combination is accepted.
pub(crate) fn supports(
    activities: &[ActivityBounds],
    is_solution: impl Fn(&[Option<&Placement>]) -> bool,
) -> Option<Vec<Support>> {
    let placements = activities
        .iter()
        .map(ActivityBounds::placements)
        .collect::<Vec<_>>();

    let mut supports = vec![Support::default(); activities.len()];
    let mut has_solution = false;
    for combination in placements
        .iter()
        .map(|placements| placements.iter().map(Option::as_ref))
        .multi_cartesian_product()
    {
        if is_solution(&combination) {
            has_solution = true;
            for (support, placement) in supports.iter_mut().zip(combination) {
                support.add(placement);
            }
        }
    }

    has_solution.then_some(supports)
}

/// Checks that the domains after propagation still contain every value of every solution.
pub(crate) fn assert_supports_kept(
    state: &State,
    activities: &[Activity<DomainId>],
    supports: &[Support],
    instance: &[ActivityBounds],
) {
    for (index, (activity, support)) in activities.iter().zip(supports).enumerate() {
        let interval = &activity.interval;
        if support.can_be_absent {
            assert!(
                !state.is_present(interval),
                "activity {index} was made present but can be absent in {instance:?}"
            );
        }

        let Some(present) = support.present else {
            continue;
        };
        assert!(
            !state.is_absent(interval),
            "activity {index} was made absent but can be present in {instance:?}"
        );
        let kept = [
            (state.start_min(interval), state.start_max(interval), present.start, "start"),
            (state.end_min(interval), state.end_max(interval), present.end, "end"),
            (state.length_min(interval), state.length_max(interval), present.length, "length"),
            (
                state.lower_bound(&activity.height),
                state.upper_bound(&activity.height),
                present.height,
                "height",
            ),
        ];
        for (lower, upper, (min, max), name) in kept {
            assert!(
                lower <= min && max <= upper,
                "the {name} of activity {index} was narrowed to [{lower}, {upper}] but takes values in [{min}, {max}] in {instance:?}"
            );
        }
    }
}

/// Whether the summed height of the running activities is at most `capacity` at every time point
/// of `[0, horizon)`.
pub(crate) fn respects_max(placements: &[Option<&Placement>], capacity: i32, horizon: i32) -> bool {
    (0..horizon).all(|time| {
        placements
            .iter()
            .flatten()
            .filter(|placement| placement.runs_at(time))
            .map(|placement| placement.height)
            .sum::<i32>()
            <= capacity
    })
}

/// Whether the summed height is at least `min_capacity` at every time point of `[0, horizon)`
/// where at least one activity runs.
pub(crate) fn respects_min(
    placements: &[Option<&Placement>],
    min_capacity: i32,
    horizon: i32,
) -> bool {
    (0..horizon).all(|time| {
        let running = placements
            .iter()
            .flatten()
            .filter(|placement| placement.runs_at(time))
            .collect::<Vec<_>>();
        running.is_empty()
            || running.iter().map(|placement| placement.height).sum::<i32>() >= min_capacity
    })
}

/// Whether no two present activities overlap.
pub(crate) fn no_two_overlap(placements: &[Option<&Placement>]) -> bool {
    placements
        .iter()
        .flatten()
        .tuple_combinations()
        .all(|(a, b)| a.end() <= b.start || b.end() <= a.start)
}

/// A search decision on a single activity.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Decision {
    StartAtMost(usize, i32),
    StartAtLeast(usize, i32),
    Presence(usize, bool),
}

impl Decision {
    /// A decision which keeps the current domains non-empty, or `None` if the chosen activity is
    /// already absent.
    fn random(
        rng: &mut SmallRng,
        state: &State,
        activities: &[Activity<DomainId>],
    ) -> Option<Decision> {
        let index = rng.gen_range(0..activities.len());
        let interval = &activities[index].interval;
        if state.is_absent(interval) {
            return None;
        }
        if !state.is_present(interval) && rng.gen_bool(0.3) {
            return Some(Decision::Presence(index, rng.gen_bool(0.5)));
        }

        let value = rng.gen_range(state.start_min(interval)..=state.start_max(interval));
        Some(if rng.gen_bool(0.5) {
            Decision::StartAtMost(index, value)
        } else {
            Decision::StartAtLeast(index, value)
        })
    }

    fn apply(
        &self,
        state: &mut State,
        activities: &[Activity<DomainId>],
    ) -> Result<(), EmptyDomain> {
        match *self {
            Decision::StartAtMost(index, value) => {
                state.modify(|context| context.set_start_max(&activities[index].interval, value))
            }
            Decision::StartAtLeast(index, value) => {
                state.modify(|context| context.set_start_min(&activities[index].interval, value))
            }
            Decision::Presence(index, true) => {
                state.modify(|context| context.set_present(&activities[index].interval))
            }
            Decision::Presence(index, false) => {
                state.modify(|context| context.set_absent(&activities[index].interval))
            }
        }
    }

    fn holds(&self, placements: &[Option<&Placement>]) -> bool {
        match *self {
            Decision::StartAtMost(index, value) => {
                placements[index].map_or(true, |placement| placement.start <= value)
            }
            Decision::StartAtLeast(index, value) => {
                placements[index].map_or(true, |placement| placement.start >= value)
            }
            Decision::Presence(index, present) => placements[index].is_some() == present,
        }
    }
}

/// The bounds of every activity, used to check that backtracking restores the domains.
fn snapshot(state: &State, activities: &[Activity<DomainId>]) -> Vec<[i32; 8]> {
    activities
        .iter()
        .map(|activity| {
            let interval = &activity.interval;
            [
                state.start_min(interval),
                state.start_max(interval),
                state.end_min(interval),
                state.end_max(interval),
                state.lower_bound(&activity.height),
                state.upper_bound(&activity.height),
                i32::from(state.is_present(interval)),
                i32::from(state.is_absent(interval)),
            ]
        })
        .collect()
}

/// Dives a few times from the root by taking random decisions, each on a new checkpoint followed
/// by a fixpoint, and checks after every step that the solutions of `instance` which agree with
/// the decisions so far are kept. Every dive ends by restoring the root.
pub(crate) fn assert_decisions_keep_solutions(
    rng: &mut SmallRng,
    state: &mut State,
    activities: &[Activity<DomainId>],
    instance: &[ActivityBounds],
    is_solution: impl Fn(&[Option<&Placement>]) -> bool,
) {
    let root = snapshot(state, activities);

    for _ in 0..3 {
        let mut decisions = Vec::new();
        for _ in 0..4 {
            let Some(decision) = Decision::random(rng, state, activities) else {
                continue;
            };
            state.new_checkpoint();
            decisions.push(decision);

            let consistent =
                decision.apply(state, activities).is_ok() && state.fixpoint().is_ok();
            let supports = supports(instance, |placements| {
                is_solution(placements)
                    && decisions
                        .iter()
                        .all(|decision| decision.holds(placements))
            });
            match (consistent, supports) {
                (true, Some(supports)) => {
                    assert_supports_kept(state, activities, &supports, instance)
                }
                (false, None) | (true, None) => {}
                (false, Some(_)) => {
                    panic!("{decisions:?} led to a conflict although {instance:?} has a solution")
                }
            }
            if !consistent {
                break;
            }
        }

        if state.checkpoint() > 0 {
            state.restore_to(0);
        }
        assert_eq!(
            root,
            snapshot(state, activities),
            "backtracking did not restore {instance:?}"
        );
    }
}
