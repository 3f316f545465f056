use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

use crate::containers::StorageKey;
use crate::engine::cp::propagation::Priority;
use crate::engine::cp::propagation::PropagatorId;
use crate::kairos_asserts::kairos_assert_moderate;

/// Enqueued propagators, served in order of [`Priority`] and first-in first-out within a
/// priority.
#[derive(Debug, Clone)]
pub(crate) struct PropagatorQueue {
    queues: Vec<VecDeque<PropagatorId>>,
    is_enqueued: FixedBitSet,
    present_priorities: BinaryHeap<Reverse<u8>>,
}

impl Default for PropagatorQueue {
    fn default() -> Self {
        PropagatorQueue {
            queues: vec![VecDeque::new(); Priority::NUM_LEVELS],
            is_enqueued: FixedBitSet::default(),
            present_priorities: BinaryHeap::new(),
        }
    }
}

impl PropagatorQueue {
    pub(crate) fn is_empty(&self) -> bool {
        self.present_priorities.is_empty()
    }

    pub(crate) fn enqueue_propagator(&mut self, propagator_id: PropagatorId, priority: Priority) {
        if self.is_propagator_enqueued(propagator_id) {
            return;
        }

        self.is_enqueued.grow(propagator_id.index() + 1);
        self.is_enqueued.insert(propagator_id.index());

        let level = priority as usize;
        if self.queues[level].is_empty() {
            self.present_priorities.push(Reverse(priority as u8));
        }
        self.queues[level].push_back(propagator_id);
    }

    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let top_priority = self.present_priorities.peek()?.0 as usize;
        kairos_assert_moderate!(!self.queues[top_priority].is_empty());

        let next_propagator_id = self.queues[top_priority].pop_front();
        if self.queues[top_priority].is_empty() {
            let _ = self.present_priorities.pop();
        }

        if let Some(propagator_id) = next_propagator_id {
            self.is_enqueued.set(propagator_id.index(), false);
        }

        next_propagator_id
    }

    pub(crate) fn clear(&mut self) {
        self.queues.iter_mut().for_each(VecDeque::clear);
        self.is_enqueued.clear();
        self.present_priorities.clear();
    }

    pub(crate) fn is_propagator_enqueued(&self, propagator_id: PropagatorId) -> bool {
        self.is_enqueued.contains(propagator_id.index())
    }
}
