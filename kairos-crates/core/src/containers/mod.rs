//! Index-keyed storage used throughout the engine.
mod keyed_vec;

pub use keyed_vec::KeyedVec;
pub use keyed_vec::StorageKey;
