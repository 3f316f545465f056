use super::HasAssignments;
use super::HasTrailedValues;
use super::Propagator;
use super::PropagatorId;
use crate::engine::cp::trailed::TrailedValues;
use crate::engine::cp::Assignments;
use crate::engine::cp::DomainEvents;
use crate::engine::cp::WatchListCP;
use crate::engine::cp::Watchers;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::IntervalVariable;

/// A propagator constructor creates a fully initialised instance of a [`Propagator`].
///
/// The constructor is responsible for indicating on which events the propagator should be
/// enqueued. Additionally, the propagator can be initialised with values that come from the
/// current domains, and can allocate trailed state.
pub trait PropagatorConstructor {
    /// The propagator that is produced by this constructor.
    type PropagatorImpl: Propagator;

    /// Create the propagator instance from `Self`.
    fn create(self, context: PropagatorConstructorContext) -> Self::PropagatorImpl;
}

/// [`PropagatorConstructorContext`] is used when [`Propagator`]s are initialised after creation.
///
/// Propagators use it to register for domain changes of variables, to read the current bounds
/// and to allocate trailed values.
#[derive(Debug)]
pub struct PropagatorConstructorContext<'a> {
    watch_list: &'a mut WatchListCP,
    trailed_values: &'a mut TrailedValues,
    assignments: &'a Assignments,
    propagator_id: PropagatorId,
}

impl<'a> PropagatorConstructorContext<'a> {
    pub(crate) fn new(
        watch_list: &'a mut WatchListCP,
        trailed_values: &'a mut TrailedValues,
        assignments: &'a Assignments,
        propagator_id: PropagatorId,
    ) -> Self {
        PropagatorConstructorContext {
            watch_list,
            trailed_values,
            assignments,
            propagator_id,
        }
    }

    /// Subscribes the propagator to the given [`DomainEvents`] of `var`.
    pub fn register(&mut self, var: impl IntegerVariable, domain_events: DomainEvents) {
        let mut watchers = Watchers::new(self.propagator_id, self.watch_list);
        var.watch_all(&mut watchers, domain_events.events());
    }

    /// Subscribes the propagator to the given [`DomainEvents`] on the start, length and end of
    /// `interval`, and to any change of its presence.
    pub fn register_interval(&mut self, interval: &IntervalVariable, domain_events: DomainEvents) {
        self.register(interval.start, domain_events);
        self.register(interval.length, domain_events);
        self.register(interval.end, domain_events);
        self.register(interval.presence, DomainEvents::ASSIGN);
    }
}

impl HasAssignments for PropagatorConstructorContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

impl HasTrailedValues for PropagatorConstructorContext<'_> {
    fn trailed_values(&self) -> &TrailedValues {
        self.trailed_values
    }

    fn trailed_values_mut(&mut self) -> &mut TrailedValues {
        self.trailed_values
    }
}
