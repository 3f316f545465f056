use log::trace;

use super::capacity_bound::CapacityBound;
use super::event::Event;
use super::event::EventKind;
use super::sweep_line::SweepLine;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorConflict;
use crate::create_statistics_struct;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::IntervalVariable;
use crate::engine::DomainEvents;
use crate::engine::EmptyDomain;
use crate::kairos_asserts::kairos_assert_simple;
use crate::propagators::cumulative::Activity;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(
    /// Statistics of the [`CumulativeSweepPropagator`].
    CumulativeSweepStatistics {
        num_calls: usize,
        num_sweeps: usize,
        /// Calls in which no event could violate the bound.
        num_skipped_sweeps: usize,
        num_events: usize,
        num_conflicts: usize,
    }
);

/// The [`PropagatorConstructor`] for the [`CumulativeSweepPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct CumulativeSweepPropagatorArgs<Var, Bound> {
    pub(crate) activities: Box<[Activity<Var>]>,
    pub(crate) bound: Bound,
}

impl<Var, Bound> PropagatorConstructor for CumulativeSweepPropagatorArgs<Var, Bound>
where
    Var: IntegerVariable,
    Bound: CapacityBound,
{
    type PropagatorImpl = CumulativeSweepPropagator<Var, Bound>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let CumulativeSweepPropagatorArgs { activities, bound } = self;

        for activity in activities.iter() {
            context.register_interval(&activity.interval, DomainEvents::BOUNDS);
            context.register(activity.height.clone(), DomainEvents::BOUNDS);
        }

        let number_of_tasks = activities.len();
        CumulativeSweepPropagator {
            activities,
            bound,
            events: Vec::with_capacity(5 * number_of_tasks),
            sweep_line: SweepLine::default(),
            to_prune: Vec::with_capacity(number_of_tasks),
            statistics: CumulativeSweepStatistics::default(),
        }
    }
}

/// The generalised sweep for a cumulative resource with variable heights, lengths and optional
/// activities, enforcing either a maximum or a minimum capacity depending on `Bound`.
///
/// Every call builds a sequence of events from the current bounds: profile events over the
/// compulsory part of present activities (certain usage) and over the whole window of
/// activities whose usage can only help the bound, and a pruning marker at the earliest start of
/// every activity which is not yet fixed. Sweeping over these events gives, between two
/// consecutive event times, a window `[low, up]` with a constant profile; each activity whose
/// marker has been passed is then pruned against that window:
/// - if it cannot run anywhere in the window, its start, end and length are narrowed so that it
///   avoids the window (forbidden);
/// - if the bound cannot be met in the window without it, it is made present and covers the
///   window (mandatory);
/// - if it certainly runs in the window, its height is narrowed (consumption).
///
/// The sweep is repeated until it no longer changes a bound.
///
/// # Bibliography
/// \[1\] A. Letort, N. Beldiceanu and M. Carlsson, ‘A scalable sweep algorithm for the
/// cumulative constraint’, CP 2012.
///
/// \[2\] N. Beldiceanu and M. Carlsson, ‘A new multi-resource cumulatives constraint with
/// negative heights’, CP 2002.
#[derive(Clone, Debug)]
pub(crate) struct CumulativeSweepPropagator<Var, Bound> {
    activities: Box<[Activity<Var>]>,
    bound: Bound,

    events: Vec<Event>,
    sweep_line: SweepLine,
    /// The activities whose pruning marker has been passed and which can still reach the
    /// current window.
    to_prune: Vec<usize>,

    statistics: CumulativeSweepStatistics,
}

impl<Var: IntegerVariable, Bound: CapacityBound> CumulativeSweepPropagator<Var, Bound> {
    /// Fills the event buffer from the current bounds; returns whether any event changes the
    /// profile or counts a running activity, i.e. whether the bound can be violated at all.
    fn generate_events(&mut self, context: PropagationContext) -> bool {
        self.events.clear();
        let mut needs_sweep = false;

        for (task, activity) in self.activities.iter().enumerate() {
            let interval = &activity.interval;
            if context.is_absent(interval) {
                continue;
            }

            let height_min = context.lower_bound(&activity.height);
            let height_max = context.upper_bound(&activity.height);
            let start_min = context.start_min(interval);
            let start_max = context.start_max(interval);
            let end_min = context.end_min(interval);
            let end_max = context.end_max(interval);

            if context.is_present(interval) && start_max < end_min {
                if self.bound.counts_as_overlapping(height_max) {
                    self.events.push(Event::check(task, start_max, 1));
                    self.events.push(Event::check(task, end_min, -1));
                    needs_sweep = true;
                }
                if let Some(height) = self.bound.compulsory_height(height_min, height_max) {
                    self.events.push(Event::profile(task, start_max, height));
                    self.events.push(Event::profile(task, end_min, -height));
                    needs_sweep = true;
                }
            }

            if let Some(height) = self.bound.optimistic_height(height_min, height_max) {
                self.events.push(Event::profile(task, start_min, height));
                self.events.push(Event::profile(task, end_max, -height));
                needs_sweep = true;
            }

            if !context.is_interval_fixed(interval) || height_min != height_max {
                self.events.push(Event::pruning(task, start_min));
            }
        }

        needs_sweep
    }

    fn sweep(&mut self, context: &mut PropagationContextMut) -> PropagationStatusCP {
        self.statistics.num_sweeps += 1;
        self.statistics.num_events += self.events.len();

        self.sweep_line.reset(self.activities.len());
        self.to_prune.clear();
        self.events.sort_by_key(|event| event.time);

        let Some(first_event) = self.events.first() else {
            return Ok(());
        };
        let mut line_time = first_event.time;

        for index in 0..self.events.len() {
            let event = self.events[index];
            if event.kind == EventKind::Pruning {
                self.to_prune.push(event.task);
                continue;
            }

            if event.time != line_time {
                self.check_bound(line_time)?;
                self.prune(context, line_time, event.time - 1)?;
                line_time = event.time;
            }

            match event.kind {
                EventKind::Profile => self.sweep_line.add_to_profile(event.task, event.magnitude),
                EventKind::Check => self.sweep_line.num_overlapping += event.magnitude,
                EventKind::Pruning => {}
            }
        }

        self.check_bound(line_time)?;
        self.prune(context, line_time, line_time)
    }

    fn check_bound(&mut self, time: i32) -> PropagationStatusCP {
        if self.bound.is_violated(&self.sweep_line) {
            self.statistics.num_conflicts += 1;
            return Err(PropagatorConflict {
                inference: Bound::VIOLATION,
                time: Some(time),
            }
            .into());
        }
        Ok(())
    }

    /// Prunes every activity on the worklist against the window `[low, up]` and drops those which
    /// cannot reach a later window.
    fn prune(&mut self, context: &mut PropagationContextMut, low: i32, up: i32) -> PropagationStatusCP {
        kairos_assert_simple!(low <= up);

        let mut kept = 0;
        for index in 0..self.to_prune.len() {
            let task = self.to_prune[index];
            let interval = self.activities[task].interval;
            if context.is_absent(&interval) {
                continue;
            }

            self.prune_forbidden(context, task, low, up)?;
            self.prune_mandatory(context, task, low, up)?;
            self.prune_consumption(context, task, low, up)?;

            if !context.is_absent(&interval) && context.end_max(&interval) > up + 1 {
                self.to_prune[kept] = task;
                kept += 1;
            }
        }
        self.to_prune.truncate(kept);

        Ok(())
    }

    fn prune_forbidden(
        &self,
        context: &mut PropagationContextMut,
        task: usize,
        low: i32,
        up: i32,
    ) -> Result<(), EmptyDomain> {
        let activity = &self.activities[task];
        let interval = &activity.interval;
        let height_min = context.lower_bound(&activity.height);
        let height_max = context.upper_bound(&activity.height);
        if !self
            .bound
            .is_forbidden(&self.sweep_line, task, height_min, height_max)
        {
            return Ok(());
        }

        // An activity which certainly overlaps the window cannot be moved out of it.
        if context.end_min(interval) > low
            && context.start_max(interval) <= up
            && context.length_min(interval) > 0
        {
            trace!("activity {task} has to run in [{low}, {up}] but cannot");
            return context.set_absent(interval);
        }

        trace!("activity {task} cannot run in [{low}, {up}]");
        let length_min = context.length_min(interval);
        if length_min > 0 {
            prune_start_range(context, interval, low - length_min + 1, up)?;
            let length_min = context.length_min(interval);
            prune_end_range(context, interval, low + 1, up + length_min)?;
        }

        let longest = (low - context.start_min(interval))
            .max(context.end_max(interval) - up - 1)
            .max(0);
        context.set_length_max(interval, longest)
    }

    fn prune_mandatory(
        &self,
        context: &mut PropagationContextMut,
        task: usize,
        low: i32,
        up: i32,
    ) -> Result<(), EmptyDomain> {
        if !self.bound.is_mandatory(&self.sweep_line, task) {
            return Ok(());
        }

        trace!("activity {task} has to cover [{low}, {up}]");
        let interval = &self.activities[task].interval;
        context.set_present(interval)?;
        context.set_start_min(interval, up - context.length_max(interval) + 1)?;
        context.set_start_max(interval, low)?;
        context.set_end_max(interval, low + context.length_max(interval))?;
        context.set_end_min(interval, up + 1)?;
        let length_min =
            (up - context.start_max(interval) + 1).min(context.end_min(interval) - low);
        context.set_length_min(interval, length_min)
    }

    fn prune_consumption(
        &self,
        context: &mut PropagationContextMut,
        task: usize,
        low: i32,
        up: i32,
    ) -> Result<(), EmptyDomain> {
        let activity = &self.activities[task];
        let interval = &activity.interval;
        if context.is_absent(interval)
            || context.end_min(interval) <= low
            || context.start_max(interval) > up
            || context.length_min(interval) <= 0
        {
            return Ok(());
        }

        self.bound
            .prune_height(context, activity, self.sweep_line.height_without(task))
    }
}

/// Removes the start times in `[low, up]` where that range touches either bound of the start.
fn prune_start_range(
    context: &mut PropagationContextMut,
    interval: &IntervalVariable,
    low: i32,
    up: i32,
) -> Result<(), EmptyDomain> {
    kairos_assert_simple!(low <= up);
    let start_min = context.start_min(interval);
    let start_max = context.start_max(interval);

    if low <= start_min && up <= start_max {
        context.set_start_min(interval, up + 1)
    } else if up >= start_max && low >= start_min {
        context.set_start_max(interval, low - 1)
    } else {
        Ok(())
    }
}

/// Removes the end times in `[low, up]` where that range touches either bound of the end.
fn prune_end_range(
    context: &mut PropagationContextMut,
    interval: &IntervalVariable,
    low: i32,
    up: i32,
) -> Result<(), EmptyDomain> {
    kairos_assert_simple!(low <= up);
    let end_min = context.end_min(interval);
    let end_max = context.end_max(interval);

    if low <= end_min && up <= end_max {
        context.set_end_min(interval, up + 1)
    } else if up >= end_max && low >= end_min {
        context.set_end_max(interval, low - 1)
    } else {
        Ok(())
    }
}

impl<Var: IntegerVariable, Bound: CapacityBound> Propagator for CumulativeSweepPropagator<Var, Bound> {
    fn name(&self) -> &str {
        Bound::NAME
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        self.statistics.num_calls += 1;

        loop {
            let trail_length = context.assignments.num_trail_entries();

            if !self.generate_events(context.as_readonly()) {
                self.statistics.num_skipped_sweeps += 1;
                return Ok(());
            }
            self.sweep(&mut context)?;

            if context.assignments.num_trail_entries() == trail_length {
                return Ok(());
            }
        }
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }
}
