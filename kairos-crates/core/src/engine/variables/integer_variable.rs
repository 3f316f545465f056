use std::fmt::Debug;

use enumset::EnumSet;

use crate::engine::cp::Assignments;
use crate::engine::cp::DomainEvent;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::Watchers;

/// The behaviour required of an integer variable: reading and narrowing its bounds, and
/// registering for changes to it.
pub trait IntegerVariable: Clone + Debug + 'static {
    /// Get the lower bound of the variable.
    fn lower_bound(&self, assignments: &Assignments) -> i32;

    /// Get the upper bound of the variable.
    fn upper_bound(&self, assignments: &Assignments) -> i32;

    /// Raise the lower bound to `value`; fails if that would empty the domain.
    fn set_lower_bound(&self, assignments: &mut Assignments, value: i32)
        -> Result<(), EmptyDomain>;

    /// Lower the upper bound to `value`; fails if that would empty the domain.
    fn set_upper_bound(&self, assignments: &mut Assignments, value: i32)
        -> Result<(), EmptyDomain>;

    /// Register a watch for this variable on the given domain events.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>);
}
