use std::fmt::Debug;
use std::fmt::Formatter;

use log::debug;

use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationOutcome;
use crate::basic_types::PropagationStatusCP;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::create_statistics_struct;
use crate::engine::cp::propagation::HasAssignments;
use crate::engine::cp::propagation::HasTrailedValues;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorConstructor;
use crate::engine::cp::propagation::PropagatorConstructorContext;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::trailed::TrailedValues;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::PropagatorQueue;
use crate::engine::cp::WatchListCP;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::IntervalVariable;
use crate::engine::variables::Literal;
use crate::kairos_asserts::kairos_assert_simple;
use crate::kairos_asserts::print_kairos_assert_warning_message;
use crate::statistics::should_log_statistics;
use crate::statistics::statistic_logging::write_closing_line;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(
    /// Counters kept by the [`State`] across all propagators.
    StateStatistics {
        num_propagator_calls: usize,
        num_conflicts: usize,
    }
);

/// Owns the domains, the trailed values and the propagators, and runs the propagators to a fixed
/// point.
///
/// A search procedure creates a checkpoint with [`State::new_checkpoint`] before making a
/// decision, and undoes everything after it with [`State::restore_to`] when the decision leads to
/// an [`Inconsistency`].
pub struct State {
    assignments: Assignments,
    trailed_values: TrailedValues,
    propagators: KeyedVec<PropagatorId, Box<dyn Propagator>>,
    watch_list: WatchListCP,
    propagator_queue: PropagatorQueue,
    true_literal: Literal,
    statistics: StateStatistics,
}

impl Default for State {
    fn default() -> Self {
        print_kairos_assert_warning_message!();

        let mut assignments = Assignments::default();
        let true_literal = Literal::new(assignments.grow(1, 1));

        State {
            assignments,
            trailed_values: TrailedValues::default(),
            propagators: KeyedVec::default(),
            watch_list: WatchListCP::default(),
            propagator_queue: PropagatorQueue::default(),
            true_literal,
            statistics: StateStatistics::default(),
        }
    }
}

impl Debug for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let propagator_names = self
            .propagators
            .iter()
            .map(|propagator| propagator.name())
            .collect::<Vec<_>>();
        f.debug_struct("State")
            .field("assignments", &self.assignments)
            .field("propagators", &propagator_names)
            .field("statistics", &self.statistics)
            .finish()
    }
}

impl HasAssignments for State {
    fn assignments(&self) -> &Assignments {
        &self.assignments
    }
}

impl HasTrailedValues for State {
    fn trailed_values(&self) -> &TrailedValues {
        &self.trailed_values
    }

    fn trailed_values_mut(&mut self) -> &mut TrailedValues {
        &mut self.trailed_values
    }
}

// Variable creation
impl State {
    /// Create a new integer variable with the domain `[lower_bound, upper_bound]`.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.assignments.grow(lower_bound, upper_bound)
    }

    /// Create a new Boolean variable.
    pub fn new_literal(&mut self) -> Literal {
        Literal::new(self.assignments.grow(0, 1))
    }

    /// A literal which is true in every state.
    pub fn get_true_literal(&self) -> Literal {
        self.true_literal
    }

    /// Create a present interval which lies within `[start_min, end_max]` and has a length in
    /// `[length_min, length_max]`.
    pub fn new_interval_variable(
        &mut self,
        start_min: i32,
        end_max: i32,
        length_min: i32,
        length_max: i32,
    ) -> IntervalVariable {
        let presence = self.true_literal;
        self.create_interval(start_min, end_max, length_min, length_max, presence)
    }

    /// Create an interval like [`State::new_interval_variable`] whose presence is still to be
    /// decided.
    pub fn new_optional_interval_variable(
        &mut self,
        start_min: i32,
        end_max: i32,
        length_min: i32,
        length_max: i32,
    ) -> IntervalVariable {
        let presence = self.new_literal();
        self.create_interval(start_min, end_max, length_min, length_max, presence)
    }

    fn create_interval(
        &mut self,
        start_min: i32,
        end_max: i32,
        length_min: i32,
        length_max: i32,
        presence: Literal,
    ) -> IntervalVariable {
        kairos_assert_simple!(
            0 <= length_min && length_min <= length_max && start_min + length_min <= end_max,
            "The interval cannot be placed in its window"
        );

        let length_max = length_max.min(end_max - start_min);
        IntervalVariable {
            start: self.new_bounded_integer(start_min, end_max - length_min),
            length: self.new_bounded_integer(length_min, length_max),
            end: self.new_bounded_integer(start_min + length_min, end_max),
            presence,
        }
    }
}

// Domain changes made from outside a propagator
impl State {
    /// Apply a change to the domains; the propagators watching the changed domains are enqueued
    /// for the next [`State::fixpoint`].
    pub fn modify(
        &mut self,
        change: impl FnOnce(&mut PropagationContextMut<'_>) -> Result<(), EmptyDomain>,
    ) -> Result<(), EmptyDomain> {
        let mut context =
            PropagationContextMut::new(&mut self.trailed_values, &mut self.assignments);
        let result = change(&mut context);
        self.notify_watchers();
        result
    }

    pub fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        self.modify(|context| context.set_lower_bound(var, bound))
    }

    pub fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        self.modify(|context| context.set_upper_bound(var, bound))
    }

    pub fn assign_literal(&mut self, literal: &Literal, value: bool) -> Result<(), EmptyDomain> {
        self.modify(|context| context.assign_literal(literal, value))
    }
}

// Propagation
impl State {
    /// Create the propagator and enqueue it; it is first called on the next
    /// [`State::fixpoint`].
    pub fn add_propagator<Constructor>(&mut self, constructor: Constructor) -> PropagatorId
    where
        Constructor: PropagatorConstructor,
    {
        let propagator_id = PropagatorId::create_from_index(self.propagators.len());
        let context = PropagatorConstructorContext::new(
            &mut self.watch_list,
            &mut self.trailed_values,
            &self.assignments,
            propagator_id,
        );
        let propagator = constructor.create(context);
        let priority = propagator.priority();

        let pushed_id = self.propagators.push(Box::new(propagator));
        kairos_assert_simple!(pushed_id == propagator_id);

        self.propagator_queue
            .enqueue_propagator(propagator_id, priority);
        propagator_id
    }

    /// Calls enqueued propagators until none is enqueued or one of them reports an
    /// [`Inconsistency`].
    ///
    /// After an inconsistency the domains are left as they were when it was detected; the caller
    /// is expected to [`State::restore_to`] an earlier checkpoint.
    pub fn fixpoint(&mut self) -> PropagationStatusCP {
        self.notify_watchers();

        while let Some(propagator_id) = self.propagator_queue.pop() {
            self.call_propagator(propagator_id)?;
            self.notify_watchers();
        }

        Ok(())
    }

    /// Calls every propagator exactly once, in the order they were added, and reports whether any
    /// domain changed.
    pub fn propagate_once(&mut self) -> Result<PropagationOutcome, Inconsistency> {
        let trail_length_before = self.assignments.num_trail_entries();

        for propagator_id in self.propagators.keys().collect::<Vec<_>>() {
            self.call_propagator(propagator_id)?;
        }
        self.notify_watchers();

        if self.assignments.num_trail_entries() == trail_length_before {
            Ok(PropagationOutcome::NoChange)
        } else {
            Ok(PropagationOutcome::Changed)
        }
    }

    fn call_propagator(&mut self, propagator_id: PropagatorId) -> PropagationStatusCP {
        self.statistics.num_propagator_calls += 1;

        let propagator = &mut self.propagators[propagator_id];
        let context = PropagationContextMut::new(&mut self.trailed_values, &mut self.assignments);
        let result = propagator.propagate(context);

        if let Err(inconsistency) = &result {
            debug!(
                "{} ({propagator_id}) detected an inconsistency: {inconsistency:?}",
                self.propagators[propagator_id].name()
            );
            self.statistics.num_conflicts += 1;
            self.propagator_queue.clear();
            self.assignments.clear_domain_events();
        }

        result
    }

    fn notify_watchers(&mut self) {
        for (domain, events) in self.assignments.drain_domain_events() {
            for propagator_id in self.watch_list.get_affected_propagators(domain, events) {
                let priority = self.propagators[propagator_id].priority();
                self.propagator_queue
                    .enqueue_propagator(propagator_id, priority);
            }
        }
    }

    /// Returns the propagator with the given id if it has type `P`.
    pub fn get_propagator<P: Propagator>(&self, propagator_id: PropagatorId) -> Option<&P> {
        self.propagators[propagator_id].downcast_ref::<P>()
    }
}

// Backtracking
impl State {
    pub fn new_checkpoint(&mut self) {
        self.assignments.new_checkpoint();
        self.trailed_values.new_checkpoint();
    }

    /// The number of checkpoints which have been created and not yet restored.
    pub fn checkpoint(&self) -> usize {
        self.assignments.checkpoint()
    }

    /// Undo every change made after the checkpoint with the given number was created.
    pub fn restore_to(&mut self, checkpoint: usize) {
        kairos_assert_simple!(checkpoint < self.checkpoint());

        self.assignments.restore_to(checkpoint);
        self.trailed_values.restore_to(checkpoint);
        self.propagator_queue.clear();

        let context = PropagationContext::new(&self.assignments);
        self.propagators
            .iter_mut()
            .for_each(|propagator| propagator.synchronise(context));
    }
}

impl State {
    /// Logs the statistics of the state and of every propagator, if statistic logging has been
    /// configured.
    pub fn log_statistics(&self) {
        if !should_log_statistics() {
            return;
        }

        self.statistics.log(StatisticLogger::new("state"));
        for (propagator_id, propagator) in self.propagators.keys().zip(self.propagators.iter()) {
            propagator.log_statistics(StatisticLogger::new(format!(
                "{}_{}",
                propagator.name(),
                propagator_id.index()
            )));
        }
        write_closing_line();
    }
}
