use log::trace;

use super::left_to_right::FilterOutcome;
use super::left_to_right::LeftToRightFilter;
use super::DisjunctiveOptions;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorConflict;
use crate::create_statistics_struct;
use crate::engine::cp::trailed::TrailedSparseSet;
use crate::engine::cp::trailed::TrailedValues;
use crate::engine::propagation::HasTrailedValues;
use crate::engine::propagation::Priority;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntervalVariable;
use crate::engine::DomainEvents;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// The latest end given to optional tasks inside the filter; large enough that they never push a
/// present task, small enough that sums of processing times do not overflow.
pub(crate) const HORIZON: i32 = i32::MAX / 4;

create_statistics_struct!(
    /// Statistics of the [`DisjunctivePropagator`].
    DisjunctiveStatistics {
        num_calls: usize,
        num_filter_runs: usize,
        num_conflicts: usize,
        num_compactions: usize,
        /// The tasks removed from the active set because they overlap no other task.
        num_tasks_compacted: usize,
        num_tasks_made_absent: usize,
    }
);

/// The [`PropagatorConstructor`] for the [`DisjunctivePropagator`].
#[derive(Clone, Debug)]
pub(crate) struct DisjunctivePropagatorArgs {
    pub(crate) intervals: Box<[IntervalVariable]>,
    pub(crate) options: DisjunctiveOptions,
}

impl PropagatorConstructor for DisjunctivePropagatorArgs {
    type PropagatorImpl = DisjunctivePropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let DisjunctivePropagatorArgs { intervals, options } = self;

        for interval in intervals.iter() {
            context.register_interval(interval, DomainEvents::BOUNDS);
        }
        let active_tasks = TrailedSparseSet::new(intervals.len(), context.trailed_values_mut());

        DisjunctivePropagator {
            intervals,
            options,
            active_tasks,
            filter: LeftToRightFilter::default(),
            members: Vec::new(),
            start_min: Vec::new(),
            duration: Vec::new(),
            end_max: Vec::new(),
            is_optional: Vec::new(),
            overlaps: Vec::new(),
            call_number: 0,
            statistics: DisjunctiveStatistics::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    LeftToRight,
    RightToLeft,
}

/// The global propagator for the no-overlap constraint over (possibly optional) intervals.
///
/// A call runs the [`LeftToRightFilter`] on the active tasks, applies the new bounds, and then
/// does the same on the mirrored tasks; this is repeated until neither direction changes a bound.
/// Optional tasks take part with an unbounded latest end: they can be pushed by the present tasks
/// but never push them, and they become absent when they no longer fit in their window.
///
/// The active tasks are kept in a [`TrailedSparseSet`]: tasks which are absent, or which cannot
/// overlap any other active task, are removed and come back only when the state backtracks.
#[derive(Debug, Clone)]
pub(crate) struct DisjunctivePropagator {
    intervals: Box<[IntervalVariable]>,
    options: DisjunctiveOptions,
    active_tasks: TrailedSparseSet,
    filter: LeftToRightFilter,

    /// The active tasks of the current pass; position `i` of the arrays below belongs to
    /// `members[i]`.
    members: Vec<usize>,
    start_min: Vec<i32>,
    duration: Vec<i32>,
    end_max: Vec<i32>,
    is_optional: Vec<bool>,
    overlaps: Vec<bool>,

    /// The number of calls so far; drives the compaction policy.
    call_number: u64,
    statistics: DisjunctiveStatistics,
}

impl DisjunctivePropagator {
    /// The number of tasks the propagator currently reasons over.
    pub(crate) fn num_active_tasks(&self, trailed_values: &TrailedValues) -> usize {
        self.active_tasks.len(trailed_values)
    }

    fn remove_absent_tasks(&mut self, context: &mut PropagationContextMut) {
        self.active_tasks
            .fill_array(context.trailed_values(), &mut self.members);
        for &task in self.members.iter() {
            if context.is_absent(&self.intervals[task]) {
                let _ = self
                    .active_tasks
                    .remove(task, context.trailed_values_mut());
            }
        }
    }

    /// Removes the tasks whose window overlaps the window of no other active task.
    fn compact(&mut self, context: &mut PropagationContextMut) {
        self.statistics.num_compactions += 1;

        self.active_tasks
            .fill_array(context.trailed_values(), &mut self.members);
        let number_of_tasks = self.members.len();

        self.overlaps.clear();
        self.overlaps.resize(number_of_tasks, false);

        if number_of_tasks > 1 {
            let intervals = &self.intervals;
            self.members
                .sort_by_key(|&task| context.start_min(&intervals[task]));

            let mut latest_end = context.end_max(&intervals[self.members[0]]);
            for index in 1..number_of_tasks {
                let interval = &intervals[self.members[index]];
                if context.start_min(interval) < latest_end {
                    self.overlaps[index] = true;
                    self.overlaps[index - 1] = true;
                    latest_end = latest_end.max(context.end_max(interval));
                } else {
                    latest_end = context.end_max(interval);
                }
            }
        }

        for index in 0..number_of_tasks {
            if !self.overlaps[index] {
                let _ = self
                    .active_tasks
                    .remove(self.members[index], context.trailed_values_mut());
                self.statistics.num_tasks_compacted += 1;
            }
        }
    }

    /// Runs the filter in one direction and applies the resulting bounds.
    fn filter_pass(
        &mut self,
        context: &mut PropagationContextMut,
        direction: Direction,
    ) -> PropagationStatusCP {
        self.remove_absent_tasks(context);
        self.active_tasks
            .fill_array(context.trailed_values(), &mut self.members);

        self.start_min.clear();
        self.duration.clear();
        self.end_max.clear();
        self.is_optional.clear();
        for &task in self.members.iter() {
            let interval = &self.intervals[task];
            let is_optional = !context.is_present(interval);
            let (start_min, end_max) = match direction {
                Direction::LeftToRight => (context.start_min(interval), context.end_max(interval)),
                Direction::RightToLeft => {
                    (-context.end_max(interval), -context.start_min(interval))
                }
            };

            self.start_min.push(start_min);
            self.duration.push(context.length_min(interval));
            self.end_max
                .push(if is_optional { HORIZON } else { end_max });
            self.is_optional.push(is_optional);
        }

        self.statistics.num_filter_runs += 1;
        match self
            .filter
            .filter(&self.start_min, &self.duration, &self.end_max)
        {
            FilterOutcome::NoChange => Ok(()),
            FilterOutcome::Inconsistency(inference) => {
                self.statistics.num_conflicts += 1;
                Err(PropagatorConflict {
                    inference,
                    time: None,
                }
                .into())
            }
            FilterOutcome::Change => self.apply_bounds(context, direction),
        }
    }

    fn apply_bounds(
        &mut self,
        context: &mut PropagationContextMut,
        direction: Direction,
    ) -> PropagationStatusCP {
        for (index, &task) in self.members.iter().enumerate() {
            let interval = &self.intervals[task];
            let start_min = self.filter.start_min()[index];
            let end_max = self.filter.end_max()[index];

            if !self.is_optional[index] {
                match direction {
                    Direction::LeftToRight => {
                        context.set_start_min(interval, start_min)?;
                        context.set_end_max(interval, end_max)?;
                    }
                    Direction::RightToLeft => {
                        context.set_end_max(interval, -start_min)?;
                        context.set_start_min(interval, -end_max)?;
                    }
                }
                continue;
            }

            let does_not_fit = match direction {
                Direction::LeftToRight => start_min > context.start_max(interval),
                Direction::RightToLeft => -start_min < context.end_min(interval),
            };
            if does_not_fit {
                trace!("optional task {task} no longer fits on the unary resource");
                context.set_absent(interval)?;
                let _ = self
                    .active_tasks
                    .remove(task, context.trailed_values_mut());
                self.statistics.num_tasks_made_absent += 1;
            }
        }

        Ok(())
    }
}

impl Propagator for DisjunctivePropagator {
    fn name(&self) -> &str {
        "NoOverlapGlobal"
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        self.statistics.num_calls += 1;
        self.call_number += 1;

        self.remove_absent_tasks(&mut context);
        if self.active_tasks.is_empty(context.trailed_values()) {
            return Ok(());
        }
        if self
            .options
            .compaction
            .should_compact(self.call_number)
        {
            self.compact(&mut context);
        }

        loop {
            let trail_length = context.assignments.num_trail_entries();

            self.filter_pass(&mut context, Direction::LeftToRight)?;
            self.filter_pass(&mut context, Direction::RightToLeft)?;

            if context.assignments.num_trail_entries() == trail_length {
                return Ok(());
            }
        }
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }
}

#[cfg(test)]
mod tests {
    use super::DisjunctivePropagator;
    use super::DisjunctivePropagatorArgs;
    use crate::basic_types::Inconsistency;
    use crate::basic_types::PropagationOutcome;
    use crate::engine::propagation::HasTrailedValues;
    use crate::engine::propagation::PropagatorId;
    use crate::engine::propagation::ReadDomains;
    use crate::engine::variables::IntervalVariable;
    use crate::engine::State;
    use crate::propagators::disjunctive::CompactionPolicy;
    use crate::propagators::disjunctive::DisjunctiveOptions;

    fn post(
        state: &mut State,
        intervals: &[IntervalVariable],
        compaction: CompactionPolicy,
    ) -> PropagatorId {
        state.add_propagator(DisjunctivePropagatorArgs {
            intervals: intervals.into(),
            options: DisjunctiveOptions { compaction },
        })
    }

    #[test]
    fn edge_finding_pushes_task_after_the_others() {
        let mut state = State::default();
        let c = state.new_interval_variable(4, 30, 4, 4);
        let d = state.new_interval_variable(13, 18, 5, 5);
        let e = state.new_interval_variable(5, 13, 3, 3);
        let f = state.new_interval_variable(5, 13, 3, 3);
        let _ = post(&mut state, &[c, d, e, f], CompactionPolicy::EveryCall);

        let result = state.fixpoint();
        assert!(result.is_ok());
        assert_eq!(18, state.start_min(&c));
    }

    #[test]
    fn overloaded_resource_is_a_conflict() {
        let mut state = State::default();
        let a = state.new_interval_variable(0, 5, 3, 3);
        let b = state.new_interval_variable(0, 5, 3, 3);
        let _ = post(&mut state, &[a, b], CompactionPolicy::EveryCall);

        let result = state.fixpoint();
        assert!(matches!(result, Err(Inconsistency::Conflict(_))));
    }

    #[test]
    fn optional_task_which_cannot_fit_becomes_absent() {
        let mut state = State::default();
        let a = state.new_interval_variable(0, 10, 10, 10);
        let b = state.new_optional_interval_variable(0, 10, 3, 3);
        let _ = post(&mut state, &[a, b], CompactionPolicy::EveryCall);

        let result = state.fixpoint();
        assert!(result.is_ok());
        assert!(state.is_absent(&b));
        assert_eq!(0, state.start_min(&a));
    }

    #[test]
    fn optional_task_does_not_push_present_task() {
        let mut state = State::default();
        let a = state.new_interval_variable(0, 10, 3, 3);
        let b = state.new_optional_interval_variable(0, 4, 4, 4);
        let _ = post(&mut state, &[a, b], CompactionPolicy::EveryCall);

        let result = state.fixpoint();
        assert!(result.is_ok());
        assert_eq!(0, state.start_min(&a));
        assert_eq!(10, state.end_max(&a));
        assert!(state.is_optional(&b));
    }

    #[test]
    fn mirrored_pass_pulls_in_latest_end() {
        let mut state = State::default();
        let a = state.new_interval_variable(0, 10, 3, 3);
        let b = state.new_interval_variable(5, 10, 4, 4);
        let _ = post(&mut state, &[a, b], CompactionPolicy::EveryCall);

        let result = state.fixpoint();
        assert!(result.is_ok());
        // b cannot precede a, so a ends before the latest start of b
        assert_eq!(6, state.end_max(&a));
        assert_eq!(3, state.start_max(&a));
        assert_eq!(5, state.start_min(&b));
    }

    #[test]
    fn tasks_without_overlap_are_compacted_and_restored() {
        let mut state = State::default();
        let a = state.new_interval_variable(0, 5, 2, 2);
        let b = state.new_interval_variable(10, 15, 2, 2);
        let c = state.new_interval_variable(12, 20, 3, 3);
        let propagator_id = post(&mut state, &[a, b, c], CompactionPolicy::EveryCall);

        state.new_checkpoint();
        let result = state.fixpoint();
        assert!(result.is_ok());

        let propagator = state
            .get_propagator::<DisjunctivePropagator>(propagator_id)
            .expect("the propagator has this type");
        assert_eq!(2, propagator.num_active_tasks(state.trailed_values()));

        state.restore_to(0);
        let propagator = state
            .get_propagator::<DisjunctivePropagator>(propagator_id)
            .expect("the propagator has this type");
        assert_eq!(3, propagator.num_active_tasks(state.trailed_values()));
    }

    #[test]
    fn throttled_compaction_leaves_the_active_set_alone_on_the_first_call() {
        let mut state = State::default();
        let a = state.new_interval_variable(0, 5, 2, 2);
        let b = state.new_interval_variable(10, 15, 2, 2);
        let propagator_id = post(&mut state, &[a, b], CompactionPolicy::Throttled { period: 100 });

        let result = state.fixpoint();
        assert!(result.is_ok());

        let propagator = state
            .get_propagator::<DisjunctivePropagator>(propagator_id)
            .expect("the propagator has this type");
        assert_eq!(2, propagator.num_active_tasks(state.trailed_values()));
    }

    #[test]
    fn throttled_compaction_runs_once_per_period() {
        let mut state = State::default();
        let a = state.new_interval_variable(0, 5, 2, 2);
        let b = state.new_interval_variable(10, 15, 2, 2);
        let propagator_id = post(&mut state, &[a, b], CompactionPolicy::Throttled { period: 2 });

        let result = state.propagate_once();
        assert!(result.is_ok());
        let propagator = state
            .get_propagator::<DisjunctivePropagator>(propagator_id)
            .expect("the propagator has this type");
        assert_eq!(2, propagator.num_active_tasks(state.trailed_values()));

        let result = state.propagate_once();
        assert!(result.is_ok());
        let propagator = state
            .get_propagator::<DisjunctivePropagator>(propagator_id)
            .expect("the propagator has this type");
        assert_eq!(0, propagator.num_active_tasks(state.trailed_values()));
    }

    #[test]
    fn second_call_changes_nothing() {
        let mut state = State::default();
        let a = state.new_interval_variable(0, 9, 4, 4);
        let b = state.new_interval_variable(2, 12, 3, 3);
        let c = state.new_optional_interval_variable(1, 8, 2, 2);
        let _ = post(&mut state, &[a, b, c], CompactionPolicy::EveryCall);

        let first = state.propagate_once();
        assert!(first.is_ok());

        let second = state.propagate_once();
        assert_eq!(Ok(PropagationOutcome::NoChange), second);
    }
}
