use itertools::Itertools;
use log::debug;

use super::add_propagator;
use super::Constraint;
use crate::basic_types::ConstraintOperationError;
use crate::engine::variables::IntervalVariable;
use crate::engine::variables::Literal;
use crate::engine::State;
use crate::propagators::disjunctive::DisjunctiveOptions;
use crate::propagators::disjunctive::DisjunctivePrecedencePropagatorArgs;
use crate::propagators::disjunctive::DisjunctivePropagatorArgs;

/// The order of one pair of intervals of a [`NoOverlap`] constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairOrder {
    pub first: usize,
    pub second: usize,
    /// True iff the interval at `first` ends before the interval at `second` starts.
    pub before: Literal,
}

/// Creates the [Disjunctive](https://sofdem.github.io/gccat/gccat/Cdisjunctive.html)
/// [`Constraint`]: no two present intervals overlap in time.
///
/// Every pair of intervals is ordered by a new literal (see [`NoOverlap::post_with_order`]) and
/// all intervals are additionally propagated together by edge-finding and related rules.
pub fn no_overlap(intervals: impl IntoIterator<Item = IntervalVariable>) -> NoOverlap {
    NoOverlap {
        intervals: intervals.into_iter().collect(),
        options: DisjunctiveOptions::default(),
    }
}

/// Creates the no-overlap [`Constraint`] enforced only by the global propagator, without ordering
/// literals for the pairs.
pub fn no_overlap_global(
    intervals: impl IntoIterator<Item = IntervalVariable>,
    options: DisjunctiveOptions,
) -> impl Constraint {
    NoOverlapGlobal {
        intervals: intervals.into_iter().collect(),
        options,
    }
}

/// Creates the [`Constraint`] that the present intervals `a` and `b` do not overlap, where
/// `before` is true iff `a` precedes `b`. Between the end of the first and the start of the
/// second at least the transition time of that order passes.
pub fn precedence_with_transition_times(
    a: IntervalVariable,
    b: IntervalVariable,
    before: Literal,
    transition_a_to_b: i32,
    transition_b_to_a: i32,
) -> impl Constraint {
    Precedence {
        a,
        b,
        before,
        transition_a_to_b,
        transition_b_to_a,
    }
}

#[derive(Debug)]
pub struct NoOverlap {
    intervals: Box<[IntervalVariable]>,
    options: DisjunctiveOptions,
}

impl NoOverlap {
    pub fn with_options(mut self, options: DisjunctiveOptions) -> Self {
        self.options = options;
        self
    }

    /// Posts the constraint like [`Constraint::post`] and returns the literals which order the
    /// pairs of intervals.
    pub fn post_with_order(
        self,
        state: &mut State,
    ) -> Result<Vec<PairOrder>, ConstraintOperationError> {
        if self.intervals.is_empty() {
            return Err(ConstraintOperationError::EmptyActivitySet);
        }
        debug!("posting no-overlap over {} intervals", self.intervals.len());

        let mut order = Vec::new();
        for ((first, &a), (second, &b)) in self.intervals.iter().enumerate().tuple_combinations() {
            let before = state.new_literal();
            add_propagator(
                state,
                DisjunctivePrecedencePropagatorArgs {
                    a,
                    b,
                    before,
                    transition_a_to_b: 0,
                    transition_b_to_a: 0,
                },
            )?;
            order.push(PairOrder {
                first,
                second,
                before,
            });
        }

        add_propagator(
            state,
            DisjunctivePropagatorArgs {
                intervals: self.intervals,
                options: self.options,
            },
        )?;

        Ok(order)
    }
}

impl Constraint for NoOverlap {
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError> {
        self.post_with_order(state).map(|_| ())
    }
}

#[derive(Debug)]
struct NoOverlapGlobal {
    intervals: Box<[IntervalVariable]>,
    options: DisjunctiveOptions,
}

impl Constraint for NoOverlapGlobal {
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError> {
        if self.intervals.is_empty() {
            return Err(ConstraintOperationError::EmptyActivitySet);
        }
        debug!(
            "posting global no-overlap over {} intervals with compaction {}",
            self.intervals.len(),
            self.options.compaction
        );

        add_propagator(
            state,
            DisjunctivePropagatorArgs {
                intervals: self.intervals,
                options: self.options,
            },
        )
    }
}

#[derive(Debug)]
struct Precedence {
    a: IntervalVariable,
    b: IntervalVariable,
    before: Literal,
    transition_a_to_b: i32,
    transition_b_to_a: i32,
}

impl Constraint for Precedence {
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError> {
        if self.transition_a_to_b < 0 || self.transition_b_to_a < 0 {
            return Err(ConstraintOperationError::NegativeTransitionTime {
                from_a_to_b: self.transition_a_to_b,
                from_b_to_a: self.transition_b_to_a,
            });
        }

        add_propagator(
            state,
            DisjunctivePrecedencePropagatorArgs {
                a: self.a,
                b: self.b,
                before: self.before,
                transition_a_to_b: self.transition_a_to_b,
                transition_b_to_a: self.transition_b_to_a,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::no_overlap;
    use super::no_overlap_global;
    use super::precedence_with_transition_times;
    use crate::basic_types::ConstraintOperationError;
    use crate::constraints::Constraint;
    use crate::engine::propagation::ReadDomains;
    use crate::engine::State;
    use crate::propagators::disjunctive::DisjunctiveOptions;

    #[test]
    fn every_pair_gets_an_order_literal() {
        let mut state = State::default();
        let intervals = [
            state.new_interval_variable(0, 20, 2, 2),
            state.new_interval_variable(0, 20, 3, 3),
            state.new_interval_variable(0, 20, 4, 4),
        ];

        let order = no_overlap(intervals).post_with_order(&mut state);
        let order = order.expect("the intervals fit");

        let pairs = order
            .iter()
            .map(|pair| (pair.first, pair.second))
            .collect::<Vec<_>>();
        assert_eq!(vec![(0, 1), (0, 2), (1, 2)], pairs);
        assert!(order
            .iter()
            .all(|pair| !state.is_literal_fixed(&pair.before)));
    }

    #[test]
    fn negative_transition_time_is_rejected() {
        let mut state = State::default();
        let a = state.new_interval_variable(0, 10, 2, 2);
        let b = state.new_interval_variable(0, 10, 2, 2);
        let before = state.new_literal();

        let result = precedence_with_transition_times(a, b, before, 1, -1).post(&mut state);
        assert_eq!(
            Err(ConstraintOperationError::NegativeTransitionTime {
                from_a_to_b: 1,
                from_b_to_a: -1
            }),
            result
        );
    }

    #[test]
    fn overloaded_intervals_are_infeasible() {
        let mut state = State::default();
        let a = state.new_interval_variable(0, 5, 3, 3);
        let b = state.new_interval_variable(0, 5, 3, 3);

        let result = no_overlap_global([a, b], DisjunctiveOptions::default()).post(&mut state);
        assert_eq!(Err(ConstraintOperationError::InfeasibleState), result);
    }

    #[test]
    fn empty_interval_set_is_rejected() {
        let mut state = State::default();

        let result = no_overlap([]).post(&mut state);
        assert_eq!(Err(ConstraintOperationError::EmptyActivitySet), result);
    }
}
