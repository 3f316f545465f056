use enumset::EnumSet;

use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::engine::cp::DomainEvent;
use crate::engine::variables::DomainId;
use crate::kairos_asserts::kairos_assert_moderate;

/// The bounds of every integer variable in the system, together with the trail needed to restore
/// them.
///
/// Domains are intervals; values are only ever removed from the bounds.
#[derive(Clone, Debug, Default)]
pub struct Assignments {
    domains: KeyedVec<DomainId, Bounds>,
    trail: Trail<BoundsChange>,
    /// The events which happened since the last call to [`Assignments::drain_domain_events`].
    events: Vec<(DomainId, EnumSet<DomainEvent>)>,
}

/// Signals that a domain mutation would have removed every value from a domain.
///
/// The domain is left untouched when this is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EmptyDomain;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bounds {
    lower_bound: i32,
    upper_bound: i32,
}

#[derive(Clone, Copy, Debug)]
struct BoundsChange {
    domain: DomainId,
    old_bounds: Bounds,
}

impl Assignments {
    pub(crate) fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        kairos_assert_moderate!(
            lower_bound <= upper_bound,
            "Cannot create a variable with an empty domain"
        );
        self.domains.push(Bounds {
            lower_bound,
            upper_bound,
        })
    }

    pub(crate) fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub(crate) fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    pub(crate) fn is_domain_assigned(&self, domain_id: DomainId) -> bool {
        let bounds = self.domains[domain_id];
        bounds.lower_bound == bounds.upper_bound
    }

    /// The number of bound changes recorded on the trail; used to detect whether a call changed
    /// anything.
    pub(crate) fn num_trail_entries(&self) -> usize {
        self.trail.len()
    }

    pub(crate) fn tighten_lower_bound(
        &mut self,
        domain_id: DomainId,
        new_lower_bound: i32,
    ) -> Result<(), EmptyDomain> {
        let old_bounds = self.domains[domain_id];
        if new_lower_bound <= old_bounds.lower_bound {
            return Ok(());
        }
        if new_lower_bound > old_bounds.upper_bound {
            return Err(EmptyDomain);
        }

        self.trail.push(BoundsChange {
            domain: domain_id,
            old_bounds,
        });
        self.domains[domain_id].lower_bound = new_lower_bound;

        let mut events = EnumSet::only(DomainEvent::LowerBound);
        if new_lower_bound == old_bounds.upper_bound {
            events |= DomainEvent::Assign;
        }
        self.events.push((domain_id, events));

        Ok(())
    }

    pub(crate) fn tighten_upper_bound(
        &mut self,
        domain_id: DomainId,
        new_upper_bound: i32,
    ) -> Result<(), EmptyDomain> {
        let old_bounds = self.domains[domain_id];
        if new_upper_bound >= old_bounds.upper_bound {
            return Ok(());
        }
        if new_upper_bound < old_bounds.lower_bound {
            return Err(EmptyDomain);
        }

        self.trail.push(BoundsChange {
            domain: domain_id,
            old_bounds,
        });
        self.domains[domain_id].upper_bound = new_upper_bound;

        let mut events = EnumSet::only(DomainEvent::UpperBound);
        if new_upper_bound == old_bounds.lower_bound {
            events |= DomainEvent::Assign;
        }
        self.events.push((domain_id, events));

        Ok(())
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint()
    }

    pub(crate) fn checkpoint(&self) -> usize {
        self.trail.checkpoint()
    }

    /// Undo every bound change made after `checkpoint` was created.
    ///
    /// Pending domain events are discarded since they refer to changes which no longer exist.
    pub(crate) fn restore_to(&mut self, checkpoint: usize) {
        let domains = &mut self.domains;
        self.trail
            .restore_to(checkpoint)
            .for_each(|change| domains[change.domain] = change.old_bounds);
        self.events.clear();
    }

    pub(crate) fn clear_domain_events(&mut self) {
        self.events.clear();
    }

    pub(crate) fn drain_domain_events(
        &mut self,
    ) -> impl Iterator<Item = (DomainId, EnumSet<DomainEvent>)> + '_ {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tightening_outside_the_domain_leaves_it_untouched() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 10);

        assert_eq!(Err(EmptyDomain), assignments.tighten_lower_bound(x, 11));
        assert_eq!(Err(EmptyDomain), assignments.tighten_upper_bound(x, -1));

        assert_eq!(0, assignments.get_lower_bound(x));
        assert_eq!(10, assignments.get_upper_bound(x));
        assert_eq!(0, assignments.num_trail_entries());
    }

    #[test]
    fn weaker_bounds_are_ignored() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(3, 10);

        assert!(assignments.tighten_lower_bound(x, 2).is_ok());
        assert!(assignments.tighten_upper_bound(x, 12).is_ok());

        assert_eq!(0, assignments.num_trail_entries());
        assert_eq!(0, assignments.drain_domain_events().count());
    }

    #[test]
    fn assigning_a_domain_reports_an_assign_event() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 5);

        assert!(assignments.tighten_lower_bound(x, 5).is_ok());

        let events = assignments.drain_domain_events().collect::<Vec<_>>();
        assert_eq!(
            vec![(x, DomainEvent::LowerBound | DomainEvent::Assign)],
            events
        );
        assert!(assignments.is_domain_assigned(x));
    }

    #[test]
    fn restoring_returns_bounds_of_the_checkpoint() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 10);

        assignments.new_checkpoint();
        assert!(assignments.tighten_lower_bound(x, 4).is_ok());
        assignments.new_checkpoint();
        assert!(assignments.tighten_upper_bound(x, 6).is_ok());
        assert!(assignments.tighten_lower_bound(x, 5).is_ok());

        assignments.restore_to(1);
        assert_eq!(4, assignments.get_lower_bound(x));
        assert_eq!(10, assignments.get_upper_bound(x));

        assignments.restore_to(0);
        assert_eq!(0, assignments.get_lower_bound(x));
        assert_eq!(0, assignments.checkpoint());
    }
}
