use crate::containers::StorageKey;

/// A handle to an integer stored in [`super::TrailedValues`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrailedInteger {
    id: u32,
}

impl StorageKey for TrailedInteger {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        Self { id: index as u32 }
    }
}
