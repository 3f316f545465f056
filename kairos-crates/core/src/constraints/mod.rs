//! Defines the constraints which can be added to a [`State`].
//!
//! A constraint is a relation over variables. It is enforced by one or more propagators; posting
//! a constraint validates its static arguments, adds its propagators and runs the propagation to
//! a fixed point.
//!
//! # Example
//! ```
//! # use kairos_core::constraints;
//! # use kairos_core::constraints::Constraint;
//! # use kairos_core::engine::propagation::ReadDomains;
//! # use kairos_core::engine::State;
//! let mut state = State::default();
//!
//! let a = state.new_interval_variable(0, 10, 3, 3);
//! let b = state.new_interval_variable(0, 10, 4, 4);
//! let order = constraints::no_overlap([a, b])
//!     .post_with_order(&mut state)
//!     .expect("the intervals fit");
//!
//! state.assign_literal(&order[0].before, true).expect("a can precede b");
//! state.fixpoint().expect("b can follow a");
//!
//! assert_eq!(3, state.start_min(&b));
//! assert_eq!(6, state.end_max(&a));
//! ```
mod cumulative;
mod disjunctive;

pub use cumulative::*;
pub use disjunctive::*;

use crate::basic_types::ConstraintOperationError;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::State;

/// A [`Constraint`] is a relation over variables which disqualifies certain assignments from
/// being a solution.
pub trait Constraint {
    /// Add the [`Constraint`] to the [`State`].
    ///
    /// Returns a [`ConstraintOperationError`] if the static arguments are invalid or if the
    /// propagation after adding the constraint led to a conflict.
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError>;
}

/// Adds the propagator and propagates; on a conflict the state is left as it was when the
/// conflict was found.
fn add_propagator(
    state: &mut State,
    constructor: impl PropagatorConstructor,
) -> Result<(), ConstraintOperationError> {
    let _ = state.add_propagator(constructor);
    state
        .fixpoint()
        .map_err(|_| ConstraintOperationError::InfeasibleState)
}
