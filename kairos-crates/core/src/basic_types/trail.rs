use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::kairos_asserts::kairos_assert_simple;

/// A stack of undo entries which is split into segments by checkpoints.
///
/// Restoring to a checkpoint hands back the entries recorded after it, most recent first, so the
/// owner can undo them in reverse order.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    /// At index `i` is the length of the trail when checkpoint `i + 1` was created.
    delimiters: Vec<usize>,
    entries: Vec<T>,
}

// Implemented by hand so that `T` is not required to implement `Default`.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            delimiters: Vec::default(),
            entries: Vec::default(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.delimiters.push(self.entries.len());
    }

    pub(crate) fn checkpoint(&self) -> usize {
        self.delimiters.len()
    }

    /// Removes every entry recorded after `checkpoint` was created and returns them in reverse
    /// order of recording.
    pub(crate) fn restore_to(&mut self, checkpoint: usize) -> Rev<Drain<'_, T>> {
        kairos_assert_simple!(
            checkpoint < self.checkpoint(),
            "Can only restore to a checkpoint which is older than the current one"
        );

        let new_length = self.delimiters[checkpoint];
        self.delimiters.truncate(checkpoint);
        self.entries.drain(new_length..).rev()
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.entries.push(entry)
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restoring_drops_entries_after_the_checkpoint() {
        let mut trail = Trail::default();
        trail.push(1);

        trail.new_checkpoint();
        trail.push(2);
        trail.new_checkpoint();
        trail.push(3);

        let _ = trail.restore_to(1);

        assert_eq!(&[1, 2], trail.deref());
        assert_eq!(1, trail.checkpoint());
    }

    #[test]
    fn restored_entries_are_given_most_recent_first() {
        let mut trail = Trail::default();
        trail.push(1);
        trail.new_checkpoint();
        trail.push(2);
        trail.push(3);
        trail.new_checkpoint();
        trail.push(4);

        let undone = trail.restore_to(0).collect::<Vec<_>>();
        assert_eq!(vec![4, 3, 2], undone);
        assert_eq!(&[1], trail.deref());
    }

    #[test]
    fn restoring_an_empty_segment_returns_nothing() {
        let mut trail: Trail<i32> = Trail::default();
        trail.new_checkpoint();

        assert_eq!(0, trail.restore_to(0).count());
        assert!(trail.is_empty());
    }
}
