use enumset::EnumSet;

use super::DomainId;
use super::IntegerVariable;
use crate::engine::cp::Assignments;
use crate::engine::cp::DomainEvent;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::Watchers;

/// A Boolean variable, represented by an integer variable with domain `{0, 1}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    integer_variable: DomainId,
}

impl Literal {
    pub(crate) fn new(integer_variable: DomainId) -> Literal {
        Literal { integer_variable }
    }

    pub fn get_integer_variable(&self) -> DomainId {
        self.integer_variable
    }

    pub(crate) fn is_true(&self, assignments: &Assignments) -> bool {
        self.lower_bound(assignments) == 1
    }

    pub(crate) fn is_false(&self, assignments: &Assignments) -> bool {
        self.upper_bound(assignments) == 0
    }

    /// Fix the literal to `value`; fails if it is already fixed to the opposite value.
    pub(crate) fn assign(
        &self,
        assignments: &mut Assignments,
        value: bool,
    ) -> Result<(), EmptyDomain> {
        if value {
            self.set_lower_bound(assignments, 1)
        } else {
            self.set_upper_bound(assignments, 0)
        }
    }
}

impl IntegerVariable for Literal {
    fn lower_bound(&self, assignments: &Assignments) -> i32 {
        self.integer_variable.lower_bound(assignments)
    }

    fn upper_bound(&self, assignments: &Assignments) -> i32 {
        self.integer_variable.upper_bound(assignments)
    }

    fn set_lower_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.integer_variable.set_lower_bound(assignments, value)
    }

    fn set_upper_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.integer_variable.set_upper_bound(assignments, value)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>) {
        self.integer_variable.watch_all(watchers, events)
    }
}
