//! Contains the propagators for the no-overlap (disjunctive) constraint, which states that a set
//! of intervals on a unary resource does not overlap in time.
//!
//! The constraint is decomposed into a `DisjunctivePrecedencePropagator` for every pair of
//! intervals, which orders the pair through a literal, and one `DisjunctivePropagator` which
//! reasons over all intervals at once. The latter performs overload checking, detectable
//! precedences, not-first/not-last and edge-finding using a theta-lambda tree.
//!
//! Optional intervals take part in both: the pairwise propagators ignore a pair as long as one of
//! the two is not present, and the global propagator lets optional intervals be pushed by the
//! present ones, marking them absent when they no longer fit.
mod binary_precedence;
mod checker;
mod disjunctive_propagator;
mod left_to_right;
mod options;
mod theta_lambda_tree;

pub(crate) use binary_precedence::DisjunctivePrecedencePropagatorArgs;
pub use checker::satisfies_no_overlap;
pub(crate) use disjunctive_propagator::DisjunctivePropagatorArgs;
pub use options::CompactionPolicy;
pub use options::DisjunctiveOptions;
