mod assignments;
mod domain_events;
pub mod propagation;
mod propagator_queue;
pub(crate) mod trailed;
mod watch_list;

pub use assignments::Assignments;
pub use assignments::EmptyDomain;
pub use domain_events::DomainEvent;
pub use domain_events::DomainEvents;
pub(crate) use propagator_queue::PropagatorQueue;
pub(crate) use watch_list::WatchListCP;
pub use watch_list::Watchers;
