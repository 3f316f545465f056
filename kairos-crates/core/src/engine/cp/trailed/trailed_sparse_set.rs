use super::TrailedInteger;
use super::TrailedValues;
use crate::kairos_asserts::kairos_assert_moderate;

/// A set over `0..n` from which elements can only be removed; removals are undone when the owning
/// [`TrailedValues`] is restored to an earlier checkpoint.
///
/// The members are kept in the prefix `elements[..size]`. Removing an element swaps it just past
/// the end of that prefix, so the elements removed after a checkpoint sit directly behind it and
/// restoring the size brings them back.
#[derive(Debug, Clone)]
pub(crate) struct TrailedSparseSet {
    elements: Vec<usize>,
    positions: Vec<usize>,
    size: TrailedInteger,
}

impl TrailedSparseSet {
    /// Creates the set containing `0..num_elements`.
    pub(crate) fn new(num_elements: usize, trailed_values: &mut TrailedValues) -> Self {
        TrailedSparseSet {
            elements: (0..num_elements).collect(),
            positions: (0..num_elements).collect(),
            size: trailed_values.grow(num_elements as i64),
        }
    }

    pub(crate) fn len(&self, trailed_values: &TrailedValues) -> usize {
        trailed_values.read(self.size) as usize
    }

    pub(crate) fn is_empty(&self, trailed_values: &TrailedValues) -> bool {
        self.len(trailed_values) == 0
    }

    pub(crate) fn contains(&self, element: usize, trailed_values: &TrailedValues) -> bool {
        element < self.positions.len() && self.positions[element] < self.len(trailed_values)
    }

    /// Removes `element` from the set, returning whether it was a member.
    pub(crate) fn remove(&mut self, element: usize, trailed_values: &mut TrailedValues) -> bool {
        if !self.contains(element, trailed_values) {
            return false;
        }

        let last_position = self.len(trailed_values) - 1;
        let position = self.positions[element];
        let last_element = self.elements[last_position];

        self.elements.swap(position, last_position);
        self.positions[last_element] = position;
        self.positions[element] = last_position;

        trailed_values.assign(self.size, last_position as i64);

        kairos_assert_moderate!(!self.contains(element, trailed_values));
        true
    }

    pub(crate) fn iter<'a>(
        &'a self,
        trailed_values: &TrailedValues,
    ) -> impl Iterator<Item = usize> + 'a {
        self.elements[..self.len(trailed_values)].iter().copied()
    }

    /// Overwrites `buffer` with the current members, in no particular order.
    pub(crate) fn fill_array(&self, trailed_values: &TrailedValues, buffer: &mut Vec<usize>) {
        buffer.clear();
        buffer.extend(self.iter(trailed_values));
    }
}
