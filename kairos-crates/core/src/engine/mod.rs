//! The reference engine around the propagators: domains, trailed state, variables and the
//! [`State`] which schedules propagators and backtracks.
pub(crate) mod cp;
mod state;
pub mod variables;

pub use cp::propagation;
pub use cp::Assignments;
pub use cp::DomainEvent;
pub use cp::DomainEvents;
pub use cp::EmptyDomain;
pub use cp::Watchers;
pub use state::State;
