use log::trace;

use crate::engine::cp::trailed::TrailedValues;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::IntervalBounds;
use crate::engine::variables::IntervalVariable;
use crate::engine::variables::Literal;

/// A read-only view of the domains.
#[derive(Clone, Copy, Debug)]
pub struct PropagationContext<'a> {
    pub(crate) assignments: &'a Assignments,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        PropagationContext { assignments }
    }
}

/// [`PropagationContextMut`] is passed to propagators during propagation.
///
/// It may be queried through [`ReadDomains`], and is the only way through which a propagator can
/// narrow domains. Every mutator fails with [`EmptyDomain`] when the narrowing would leave no
/// value, and a change is visible to every subsequent read in the same call.
#[derive(Debug)]
pub struct PropagationContextMut<'a> {
    pub(crate) trailed_values: &'a mut TrailedValues,
    pub(crate) assignments: &'a mut Assignments,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(
        trailed_values: &'a mut TrailedValues,
        assignments: &'a mut Assignments,
    ) -> Self {
        PropagationContextMut {
            trailed_values,
            assignments,
        }
    }

    pub fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext {
            assignments: self.assignments,
        }
    }

    pub fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        var.set_lower_bound(self.assignments, bound)
    }

    pub fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        var.set_upper_bound(self.assignments, bound)
    }

    pub fn assign_literal(&mut self, literal: &Literal, value: bool) -> Result<(), EmptyDomain> {
        literal.assign(self.assignments, value)
    }

    /// Forces the interval to be present; fails if it is absent.
    pub fn set_present(&mut self, interval: &IntervalVariable) -> Result<(), EmptyDomain> {
        interval.presence.assign(self.assignments, true)
    }

    /// Forces the interval to be absent; fails if it is present.
    pub fn set_absent(&mut self, interval: &IntervalVariable) -> Result<(), EmptyDomain> {
        trace!("interval {:?} marked absent", interval.start);
        interval.presence.assign(self.assignments, false)
    }

    pub fn set_start_min(
        &mut self,
        interval: &IntervalVariable,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.update_interval(interval, |bounds| bounds.start_min = bounds.start_min.max(value))
    }

    pub fn set_start_max(
        &mut self,
        interval: &IntervalVariable,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.update_interval(interval, |bounds| bounds.start_max = bounds.start_max.min(value))
    }

    pub fn set_end_min(
        &mut self,
        interval: &IntervalVariable,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.update_interval(interval, |bounds| bounds.end_min = bounds.end_min.max(value))
    }

    pub fn set_end_max(
        &mut self,
        interval: &IntervalVariable,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.update_interval(interval, |bounds| bounds.end_max = bounds.end_max.min(value))
    }

    pub fn set_length_min(
        &mut self,
        interval: &IntervalVariable,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.update_interval(interval, |bounds| {
            bounds.length_min = bounds.length_min.max(value)
        })
    }

    pub fn set_length_max(
        &mut self,
        interval: &IntervalVariable,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.update_interval(interval, |bounds| {
            bounds.length_max = bounds.length_max.min(value)
        })
    }

    /// Narrows the bounds of an interval and closes them under `start + length = end`.
    ///
    /// Nothing happens to an absent interval. If no placement remains, an optional interval
    /// becomes absent while a present one fails.
    pub(crate) fn update_interval(
        &mut self,
        interval: &IntervalVariable,
        narrow: impl FnOnce(&mut IntervalBounds),
    ) -> Result<(), EmptyDomain> {
        if interval.is_absent(self.assignments) {
            return Ok(());
        }

        let mut bounds = IntervalBounds::read(interval, self.assignments);
        narrow(&mut bounds);

        if bounds.close() {
            bounds.write(interval, self.assignments)
        } else if interval.is_present(self.assignments) {
            Err(EmptyDomain)
        } else {
            self.set_absent(interval)
        }
    }
}

/// A trait which defines common methods for retrieving the [`Assignments`] from the structure
/// which implements this trait.
pub trait HasAssignments {
    fn assignments(&self) -> &Assignments;
}

pub(crate) trait HasTrailedValues {
    fn trailed_values(&self) -> &TrailedValues;
    fn trailed_values_mut(&mut self) -> &mut TrailedValues;
}

impl HasAssignments for PropagationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

impl HasAssignments for PropagationContextMut<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

impl HasTrailedValues for PropagationContextMut<'_> {
    fn trailed_values(&self) -> &TrailedValues {
        self.trailed_values
    }

    fn trailed_values_mut(&mut self) -> &mut TrailedValues {
        self.trailed_values
    }
}

/// Read access to the domains of integer, Boolean and interval variables.
pub trait ReadDomains: HasAssignments {
    /// Returns `true` if the domain of the given variable is singleton.
    fn is_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        self.lower_bound(var) == self.upper_bound(var)
    }

    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.assignments())
    }

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.assignments())
    }

    fn is_literal_true(&self, literal: &Literal) -> bool {
        literal.is_true(self.assignments())
    }

    fn is_literal_false(&self, literal: &Literal) -> bool {
        literal.is_false(self.assignments())
    }

    fn is_literal_fixed(&self, literal: &Literal) -> bool {
        self.is_fixed(literal)
    }

    fn start_min(&self, interval: &IntervalVariable) -> i32 {
        self.lower_bound(&interval.start)
    }

    fn start_max(&self, interval: &IntervalVariable) -> i32 {
        self.upper_bound(&interval.start)
    }

    fn end_min(&self, interval: &IntervalVariable) -> i32 {
        self.lower_bound(&interval.end)
    }

    fn end_max(&self, interval: &IntervalVariable) -> i32 {
        self.upper_bound(&interval.end)
    }

    fn length_min(&self, interval: &IntervalVariable) -> i32 {
        self.lower_bound(&interval.length)
    }

    fn length_max(&self, interval: &IntervalVariable) -> i32 {
        self.upper_bound(&interval.length)
    }

    fn is_present(&self, interval: &IntervalVariable) -> bool {
        interval.is_present(self.assignments())
    }

    fn is_absent(&self, interval: &IntervalVariable) -> bool {
        interval.is_absent(self.assignments())
    }

    /// An interval is optional while its presence is undecided.
    fn is_optional(&self, interval: &IntervalVariable) -> bool {
        !self.is_literal_fixed(&interval.presence)
    }

    /// Whether the interval is absent, or present with all of its bounds assigned.
    fn is_interval_fixed(&self, interval: &IntervalVariable) -> bool {
        interval.is_fixed(self.assignments())
    }
}

impl<T: HasAssignments> ReadDomains for T {}
