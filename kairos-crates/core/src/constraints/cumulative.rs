use log::debug;

use super::add_propagator;
use super::Constraint;
use crate::basic_types::ConstraintOperationError;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::engine::State;
use crate::propagators::cumulative::sweep::CumulativeSweepPropagatorArgs;
use crate::propagators::cumulative::sweep::MaxCapacity;
use crate::propagators::cumulative::sweep::MinCapacity;
use crate::propagators::cumulative::Activity;
use crate::propagators::cumulative::CumulativeDecompositionPropagatorArgs;
use crate::propagators::cumulative::CumulativeOptions;
use crate::propagators::cumulative::CumulativePropagationMethod;

/// Creates the [Cumulative](https://sofdem.github.io/gccat/gccat/Ccumulative.html) [`Constraint`]
/// with a maximum capacity: at every time point the summed height of the running activities is
/// at most `capacity`.
///
/// Heights may be negative, in which case the activity produces the resource, unless
/// [`CumulativePropagationMethod::TimePointDecomposition`] is used.
pub fn cumulative_max<Var: IntegerVariable>(
    activities: impl IntoIterator<Item = Activity<Var>>,
    capacity: i32,
    options: CumulativeOptions,
) -> impl Constraint {
    CumulativeMax {
        activities: activities.into_iter().collect(),
        capacity,
        options,
    }
}

/// Creates the cumulative [`Constraint`] with a minimum capacity: at every time point where at
/// least one activity runs, the summed height of the running activities is at least
/// `min_capacity`.
pub fn cumulative_min<Var: IntegerVariable>(
    activities: impl IntoIterator<Item = Activity<Var>>,
    min_capacity: i32,
) -> impl Constraint {
    CumulativeMin {
        activities: activities.into_iter().collect(),
        min_capacity,
    }
}

/// Creates the cumulative [`Constraint`] with a maximum capacity which is enforced per time point
/// over the compulsory parts only. It is much slower and weaker than [`cumulative_max`]; it
/// serves as a reference.
pub fn cumulative_decomposition<Var: IntegerVariable>(
    activities: impl IntoIterator<Item = Activity<Var>>,
    capacity: i32,
) -> impl Constraint {
    cumulative_max(
        activities,
        capacity,
        CumulativeOptions::new(CumulativePropagationMethod::TimePointDecomposition),
    )
}

#[derive(Debug)]
struct CumulativeMax<Var> {
    activities: Box<[Activity<Var>]>,
    capacity: i32,
    options: CumulativeOptions,
}

impl<Var: IntegerVariable> Constraint for CumulativeMax<Var> {
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError> {
        if self.capacity < 0 {
            return Err(ConstraintOperationError::NegativeCapacity(self.capacity));
        }
        validate_heights(state, &self.activities)?;

        debug!(
            "posting cumulative over {} activities with capacity {} using {}",
            self.activities.len(),
            self.capacity,
            self.options.propagation_method
        );

        match self.options.propagation_method {
            CumulativePropagationMethod::Sweep => add_propagator(
                state,
                CumulativeSweepPropagatorArgs {
                    activities: self.activities,
                    bound: MaxCapacity(self.capacity),
                },
            ),
            CumulativePropagationMethod::TimePointDecomposition => {
                if let Some((activity, min)) = self
                    .activities
                    .iter()
                    .map(|activity| state.lower_bound(&activity.height))
                    .enumerate()
                    .find(|&(_, min)| min < 0)
                {
                    return Err(ConstraintOperationError::NegativeHeight { activity, min });
                }

                add_propagator(
                    state,
                    CumulativeDecompositionPropagatorArgs {
                        activities: self.activities,
                        capacity: self.capacity,
                    },
                )
            }
        }
    }
}

#[derive(Debug)]
struct CumulativeMin<Var> {
    activities: Box<[Activity<Var>]>,
    min_capacity: i32,
}

impl<Var: IntegerVariable> Constraint for CumulativeMin<Var> {
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError> {
        if self.min_capacity < 0 {
            return Err(ConstraintOperationError::NegativeCapacity(
                self.min_capacity,
            ));
        }
        validate_heights(state, &self.activities)?;

        debug!(
            "posting cumulative over {} activities with minimum capacity {}",
            self.activities.len(),
            self.min_capacity
        );

        add_propagator(
            state,
            CumulativeSweepPropagatorArgs {
                activities: self.activities,
                bound: MinCapacity(self.min_capacity),
            },
        )
    }
}

fn validate_heights<Var: IntegerVariable>(
    state: &State,
    activities: &[Activity<Var>],
) -> Result<(), ConstraintOperationError> {
    if activities.is_empty() {
        return Err(ConstraintOperationError::EmptyActivitySet);
    }

    for (index, activity) in activities.iter().enumerate() {
        let min = state.lower_bound(&activity.height);
        let max = state.upper_bound(&activity.height);
        if min > max {
            return Err(ConstraintOperationError::InvalidHeightRange {
                activity: index,
                min,
                max,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::cumulative_decomposition;
    use super::cumulative_max;
    use super::cumulative_min;
    use crate::basic_types::ConstraintOperationError;
    use crate::constraints::Constraint;
    use crate::engine::propagation::ReadDomains;
    use crate::engine::State;
    use crate::propagators::cumulative::Activity;
    use crate::propagators::cumulative::CumulativeOptions;

    #[test]
    fn negative_capacity_is_rejected() {
        let mut state = State::default();
        let interval = state.new_interval_variable(0, 5, 2, 2);

        let result =
            cumulative_max([Activity::new(interval, 1)], -1, CumulativeOptions::default())
                .post(&mut state);
        assert_eq!(Err(ConstraintOperationError::NegativeCapacity(-1)), result);

        let result = cumulative_min([Activity::new(interval, 1)], -2).post(&mut state);
        assert_eq!(Err(ConstraintOperationError::NegativeCapacity(-2)), result);
    }

    #[test]
    fn empty_activity_set_is_rejected() {
        let mut state = State::default();

        let result = cumulative_max(Vec::<Activity<i32>>::new(), 1, CumulativeOptions::default())
            .post(&mut state);
        assert_eq!(Err(ConstraintOperationError::EmptyActivitySet), result);
    }

    #[test]
    fn decomposition_rejects_producers() {
        let mut state = State::default();
        let a = state.new_interval_variable(0, 5, 2, 2);
        let b = state.new_interval_variable(0, 5, 2, 2);

        let result = cumulative_decomposition([Activity::new(a, 1), Activity::new(b, -1)], 1)
            .post(&mut state);
        assert_eq!(
            Err(ConstraintOperationError::NegativeHeight {
                activity: 1,
                min: -1
            }),
            result
        );
    }

    #[test]
    fn infeasible_root_is_reported() {
        let mut state = State::default();
        let a = state.new_interval_variable(0, 4, 4, 4);
        let b = state.new_interval_variable(0, 4, 4, 4);

        let result = cumulative_max(
            [Activity::new(a, 2), Activity::new(b, 2)],
            3,
            CumulativeOptions::default(),
        )
        .post(&mut state);
        assert_eq!(Err(ConstraintOperationError::InfeasibleState), result);
    }

    #[test]
    fn posting_propagates_at_the_root() {
        let mut state = State::default();
        let a = state.new_interval_variable(0, 4, 4, 4);
        let b = state.new_interval_variable(0, 10, 3, 3);

        let result = cumulative_max(
            [Activity::new(a, 2), Activity::new(b, 2)],
            3,
            CumulativeOptions::default(),
        )
        .post(&mut state);
        assert!(result.is_ok());
        assert_eq!(4, state.start_min(&b));
    }
}
