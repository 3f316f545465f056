//! Contains the traits and structures through which propagators are created, invoked and given
//! access to the domains.
//!
//! A propagator is created from a [`PropagatorConstructor`], which registers the domains it wants
//! to be enqueued for. Afterwards the [`crate::engine::State`] calls [`Propagator::propagate`]
//! with a [`PropagationContextMut`] every time one of those domains changed.
pub(crate) mod constructor;
pub(crate) mod contexts;
pub(crate) mod propagator;
pub(crate) mod propagator_id;

pub use constructor::PropagatorConstructor;
pub use constructor::PropagatorConstructorContext;
pub use contexts::HasAssignments;
pub use contexts::PropagationContext;
pub use contexts::PropagationContextMut;
pub use contexts::ReadDomains;
pub(crate) use contexts::HasTrailedValues;
pub use propagator::Priority;
pub use propagator::Propagator;
pub use propagator_id::PropagatorId;
