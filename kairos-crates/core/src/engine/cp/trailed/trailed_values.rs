use super::TrailedChange;
use super::TrailedInteger;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;

/// Integers owned by propagators which are restored together with the domains when the state
/// backtracks.
#[derive(Default, Debug, Clone)]
pub(crate) struct TrailedValues {
    trail: Trail<TrailedChange>,
    values: KeyedVec<TrailedInteger, i64>,
}

impl TrailedValues {
    pub(crate) fn grow(&mut self, initial_value: i64) -> TrailedInteger {
        self.values.push(initial_value)
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint()
    }

    pub(crate) fn read(&self, trailed_integer: TrailedInteger) -> i64 {
        self.values[trailed_integer]
    }

    pub(crate) fn restore_to(&mut self, checkpoint: usize) {
        let values = &mut self.values;
        self.trail
            .restore_to(checkpoint)
            .for_each(|change| values[change.reference] = change.old_value)
    }

    pub(crate) fn assign(&mut self, trailed_integer: TrailedInteger, value: i64) {
        let old_value = self.values[trailed_integer];
        if old_value == value {
            return;
        }
        self.trail.push(TrailedChange {
            old_value,
            reference: trailed_integer,
        });
        self.values[trailed_integer] = value;
    }

    pub(crate) fn add_assign(&mut self, trailed_integer: TrailedInteger, addition: i64) {
        self.assign(trailed_integer, self.values[trailed_integer] + addition);
    }
}
