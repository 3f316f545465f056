use super::DomainId;
use super::IntegerVariable;
use super::Literal;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;

/// An optional interval of time: a start, a length and an end linked by `start + length = end`,
/// together with a literal stating whether the interval is present.
///
/// When the presence literal is false the interval is absent and its bounds carry no meaning.
/// When it is unassigned the interval is optional.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntervalVariable {
    pub start: DomainId,
    pub length: DomainId,
    pub end: DomainId,
    pub presence: Literal,
}

impl IntervalVariable {
    pub(crate) fn is_present(&self, assignments: &Assignments) -> bool {
        self.presence.is_true(assignments)
    }

    pub(crate) fn is_absent(&self, assignments: &Assignments) -> bool {
        self.presence.is_false(assignments)
    }

    /// Whether the interval is absent, or present with start, length and end all assigned.
    pub(crate) fn is_fixed(&self, assignments: &Assignments) -> bool {
        self.is_absent(assignments)
            || (self.is_present(assignments)
                && assignments.is_domain_assigned(self.start)
                && assignments.is_domain_assigned(self.length)
                && assignments.is_domain_assigned(self.end))
    }
}

/// A snapshot of the six bounds of an [`IntervalVariable`] which can be narrowed and closed under
/// `start + length = end` before being written back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct IntervalBounds {
    pub(crate) start_min: i32,
    pub(crate) start_max: i32,
    pub(crate) length_min: i32,
    pub(crate) length_max: i32,
    pub(crate) end_min: i32,
    pub(crate) end_max: i32,
}

impl IntervalBounds {
    pub(crate) fn read(interval: &IntervalVariable, assignments: &Assignments) -> Self {
        IntervalBounds {
            start_min: interval.start.lower_bound(assignments),
            start_max: interval.start.upper_bound(assignments),
            length_min: interval.length.lower_bound(assignments),
            length_max: interval.length.upper_bound(assignments),
            end_min: interval.end.lower_bound(assignments),
            end_max: interval.end.upper_bound(assignments),
        }
    }

    /// Tightens the bounds until they are consistent with `start + length = end`.
    ///
    /// Returns `false` if some bound crossed, in which case the interval has no valid placement.
    pub(crate) fn close(&mut self) -> bool {
        loop {
            let before = *self;

            self.start_min = self
                .start_min
                .max(self.end_min.saturating_sub(self.length_max));
            self.start_max = self
                .start_max
                .min(self.end_max.saturating_sub(self.length_min));
            self.end_min = self
                .end_min
                .max(self.start_min.saturating_add(self.length_min));
            self.end_max = self
                .end_max
                .min(self.start_max.saturating_add(self.length_max));
            self.length_min = self
                .length_min
                .max(self.end_min.saturating_sub(self.start_max));
            self.length_max = self
                .length_max
                .min(self.end_max.saturating_sub(self.start_min));

            if self.start_min > self.start_max
                || self.length_min > self.length_max
                || self.end_min > self.end_max
            {
                return false;
            }
            if *self == before {
                return true;
            }
        }
    }

    pub(crate) fn write(
        &self,
        interval: &IntervalVariable,
        assignments: &mut Assignments,
    ) -> Result<(), EmptyDomain> {
        interval.start.set_lower_bound(assignments, self.start_min)?;
        interval.start.set_upper_bound(assignments, self.start_max)?;
        interval.length.set_lower_bound(assignments, self.length_min)?;
        interval.length.set_upper_bound(assignments, self.length_max)?;
        interval.end.set_lower_bound(assignments, self.end_min)?;
        interval.end.set_upper_bound(assignments, self.end_max)
    }
}
