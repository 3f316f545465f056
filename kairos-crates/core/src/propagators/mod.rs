//! The propagators of the resource constraints: the cumulative constraint with a maximum or a
//! minimum capacity, and the no-overlap constraint on a unary resource.
//!
//! Propagators are not created directly; they are added to a [`State`](crate::engine::State)
//! through the [`constraints`](crate::constraints) module.
pub mod cumulative;
pub mod disjunctive;
