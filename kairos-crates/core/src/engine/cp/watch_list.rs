use enumset::EnumSet;

use crate::containers::StorageKey;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::DomainEvent;
use crate::engine::variables::DomainId;

/// For every domain, the propagators which should be enqueued when it changes.
#[derive(Debug, Default, Clone)]
pub(crate) struct WatchListCP {
    watchers: Vec<Vec<Watcher>>,
}

#[derive(Debug, Clone, Copy)]
struct Watcher {
    propagator: PropagatorId,
    events: EnumSet<DomainEvent>,
}

impl WatchListCP {
    /// The propagators watching `domain` for any of `events`.
    pub(crate) fn get_affected_propagators(
        &self,
        domain: DomainId,
        events: EnumSet<DomainEvent>,
    ) -> impl Iterator<Item = PropagatorId> + '_ {
        self.watchers
            .get(domain.index())
            .into_iter()
            .flatten()
            .filter(move |watcher| !watcher.events.is_disjoint(events))
            .map(|watcher| watcher.propagator)
    }

    fn watch(&mut self, domain: DomainId, propagator: PropagatorId, events: EnumSet<DomainEvent>) {
        if self.watchers.len() <= domain.index() {
            self.watchers.resize_with(domain.index() + 1, Vec::new);
        }

        let watchers = &mut self.watchers[domain.index()];
        if let Some(existing) = watchers
            .iter_mut()
            .find(|watcher| watcher.propagator == propagator)
        {
            existing.events |= events;
        } else {
            watchers.push(Watcher { propagator, events });
        }
    }
}

/// Used by variables to subscribe a single propagator to their domains.
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator: PropagatorId,
    watch_list: &'a mut WatchListCP,
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(propagator: PropagatorId, watch_list: &'a mut WatchListCP) -> Self {
        Watchers {
            propagator,
            watch_list,
        }
    }

    pub(crate) fn watch_all(&mut self, domain: DomainId, events: EnumSet<DomainEvent>) {
        self.watch_list.watch(domain, self.propagator, events);
    }
}
