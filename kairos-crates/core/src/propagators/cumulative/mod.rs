//! Propagators for the [Cumulative](https://sofdem.github.io/gccat/gccat/Ccumulative.html)
//! constraint over (possibly optional) intervals with variable lengths and heights.
//!
//! # Theoretical
//!
//! The constraint reasons over a set of [`Activity`]s on a single resource. Each activity has:
//! - an interval with a start `s_i`, a length `p_i` and an end `e_i = s_i + p_i`, which is present,
//!   absent or still optional;
//! - a height `h_i`, the amount of the resource it uses while it runs; negative heights produce
//!   the resource.
//!
//! An activity runs at time point *t* if it is present and `s_i <= t < e_i`. The variant with a
//! maximum capacity `C` requires that at every *t* the summed height of the running activities
//! is at most `C`. The variant with a minimum capacity `C` requires that the summed height is at
//! least `C` at every *t* where at least one activity runs.
//!
//! The interval `[LST_i, ECT_i)` between the latest start and the earliest end is the
//! compulsory part of the activity: if it is present, it certainly runs there.
//!
//! # Practical
//!
//! Both variants are enforced by the generalised sweep. For testing there is a
//! slower propagator which only reasons per time point (see [`CumulativePropagationMethod`]) and
//! checkers for fixed assignments based on a [`ResourceProfile`].
//!
//! # Bibliography
//! \[1\] A. Letort, N. Beldiceanu and M. Carlsson, ‘A scalable sweep algorithm for the
//! cumulative constraint’, CP 2012.
mod activity;
mod checker;
mod decomposition;
mod options;
mod profile;
pub(crate) mod sweep;

pub use activity::Activity;
pub use checker::satisfies_cumulative_max;
pub use checker::satisfies_cumulative_min;
pub(crate) use decomposition::CumulativeDecompositionPropagatorArgs;
pub use options::CumulativeOptions;
pub use options::CumulativePropagationMethod;
pub use profile::Rectangle;
pub use profile::ResourceProfile;
