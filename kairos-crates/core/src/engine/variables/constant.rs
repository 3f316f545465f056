use enumset::EnumSet;

use crate::engine::cp::Assignments;
use crate::engine::cp::DomainEvent;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::Watchers;
use crate::engine::variables::IntegerVariable;

impl IntegerVariable for i32 {
    fn lower_bound(&self, _assignments: &Assignments) -> i32 {
        *self
    }

    fn upper_bound(&self, _assignments: &Assignments) -> i32 {
        *self
    }

    fn set_lower_bound(
        &self,
        _assignments: &mut Assignments,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        if value > *self {
            Err(EmptyDomain)
        } else {
            Ok(())
        }
    }

    fn set_upper_bound(
        &self,
        _assignments: &mut Assignments,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        if value < *self {
            Err(EmptyDomain)
        } else {
            Ok(())
        }
    }

    fn watch_all(&self, _watchers: &mut Watchers<'_>, _events: EnumSet<DomainEvent>) {}
}
