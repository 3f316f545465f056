//! The generalised sweep for the cumulative constraint, shared by the variant with a maximum
//! capacity and the one with a minimum capacity. See `CumulativeSweepPropagator` for the
//! algorithm.
mod capacity_bound;
mod event;
mod sweep_line;
mod sweep_propagator;

pub(crate) use capacity_bound::MaxCapacity;
pub(crate) use capacity_bound::MinCapacity;
pub(crate) use sweep_propagator::CumulativeSweepPropagatorArgs;
