//! # Kairos
//! Kairos provides the resource reasoning of a constraint-based scheduler: propagators which
//! narrow the time windows, lengths and resource usage of activities so that no solution is lost.
//!
//! The crate contains:
//! * the [generalised cumulative sweep][crate::constraints::cumulative_max] for resources with a
//!   maximum capacity, and its counterpart for a
//!   [minimum capacity][crate::constraints::cumulative_min]; both support optional activities,
//!   variable lengths and variable (also negative) heights;
//! * the [no-overlap constraint][crate::constraints::no_overlap], enforced by a propagator per
//!   pair of intervals and a global propagator performing overload checking, detectable
//!   precedences, not-first/not-last and edge-finding with a theta-lambda tree;
//! * [checkers][crate::propagators::cumulative::satisfies_cumulative_max] for fixed assignments.
//!
//! The propagators run inside a small reference [`State`] which owns bounded integer domains,
//! trailed values and a priority queue of propagators. A search procedure creates checkpoints on
//! it and restores them on a conflict.
//!
//! # Example
//! ```rust
//! # use kairos_core::constraints;
//! # use kairos_core::constraints::Constraint;
//! # use kairos_core::engine::propagation::ReadDomains;
//! # use kairos_core::engine::State;
//! # use kairos_core::propagators::cumulative::Activity;
//! # use kairos_core::propagators::cumulative::CumulativeOptions;
//! let mut state = State::default();
//!
//! // A fixed activity which uses 2 units over [0, 4) and a movable one which uses 2 units for 3
//! // time units somewhere in [0, 10).
//! let fixed = state.new_interval_variable(0, 4, 4, 4);
//! let movable = state.new_interval_variable(0, 10, 3, 3);
//!
//! constraints::cumulative_max(
//!     [Activity::new(fixed, 2), Activity::new(movable, 2)],
//!     3,
//!     CumulativeOptions::default(),
//! )
//! .post(&mut state)
//! .expect("the activities fit on the resource");
//!
//! // The movable activity cannot run together with the fixed one.
//! assert_eq!(4, state.start_min(&movable));
//! ```
pub(crate) mod kairos_asserts;

pub mod basic_types;
pub mod constraints;
pub mod containers;
pub mod engine;
pub mod propagators;
pub mod statistics;

pub use convert_case;

pub use crate::basic_types::ConstraintOperationError;
pub use crate::engine::State;
