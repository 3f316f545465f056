//! A slow propagator for the cumulative constraint with a maximum capacity which reasons over
//! every time point separately. It only uses the compulsory parts of present activities, so it
//! is weaker than the sweep; it serves as a reference for it.

use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorConflict;
use crate::basic_types::ResourceInference;
use crate::create_statistics_struct;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::engine::DomainEvents;
use crate::propagators::cumulative::Activity;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(
    /// Statistics of the [`CumulativeDecompositionPropagator`].
    CumulativeDecompositionStatistics {
        num_calls: usize,
        num_time_points: usize,
        num_conflicts: usize,
    }
);

/// The [`PropagatorConstructor`] for the [`CumulativeDecompositionPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct CumulativeDecompositionPropagatorArgs<Var> {
    pub(crate) activities: Box<[Activity<Var>]>,
    pub(crate) capacity: i32,
}

impl<Var: IntegerVariable> PropagatorConstructor for CumulativeDecompositionPropagatorArgs<Var> {
    type PropagatorImpl = CumulativeDecompositionPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        for activity in self.activities.iter() {
            context.register_interval(&activity.interval, DomainEvents::BOUNDS);
            context.register(activity.height.clone(), DomainEvents::LOWER_BOUND);
        }

        CumulativeDecompositionPropagator {
            activities: self.activities,
            capacity: self.capacity,
            running: Vec::new(),
            statistics: CumulativeDecompositionStatistics::default(),
        }
    }
}

/// For every time point `t` of the horizon, the minimum heights of the present activities whose
/// compulsory part contains `t` may not exceed the capacity; the maximum height of each of those
/// activities is at most what the others leave free.
///
/// Heights are expected to be non-negative.
#[derive(Clone, Debug)]
pub(crate) struct CumulativeDecompositionPropagator<Var> {
    activities: Box<[Activity<Var>]>,
    capacity: i32,
    /// The activities which certainly run at the current time point.
    running: Vec<usize>,
    statistics: CumulativeDecompositionStatistics,
}

impl<Var: IntegerVariable> Propagator for CumulativeDecompositionPropagator<Var> {
    fn name(&self) -> &str {
        "CumulativeDecomposition"
    }

    fn priority(&self) -> Priority {
        Priority::VeryLow
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        self.statistics.num_calls += 1;

        let mut horizon_start = i32::MAX;
        let mut horizon_end = i32::MIN;
        for activity in self.activities.iter() {
            if !context.is_absent(&activity.interval) {
                horizon_start = horizon_start.min(context.start_min(&activity.interval));
                horizon_end = horizon_end.max(context.end_max(&activity.interval));
            }
        }

        for time in horizon_start..horizon_end {
            self.statistics.num_time_points += 1;

            self.running.clear();
            let mut load = 0;
            for (task, activity) in self.activities.iter().enumerate() {
                let interval = &activity.interval;
                if context.is_present(interval)
                    && context.start_max(interval) <= time
                    && time < context.end_min(interval)
                {
                    self.running.push(task);
                    load += context.lower_bound(&activity.height);
                }
            }

            if load > self.capacity {
                self.statistics.num_conflicts += 1;
                return Err(PropagatorConflict {
                    inference: ResourceInference::CapacityOverflow,
                    time: Some(time),
                }
                .into());
            }

            for &task in self.running.iter() {
                let height = &self.activities[task].height;
                let free = self.capacity - (load - context.lower_bound(height));
                context.set_upper_bound(height, free)?;
            }
        }

        Ok(())
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }
}
