use downcast_rs::impl_downcast;
use downcast_rs::Downcast;

use super::PropagationContext;
use super::PropagationContextMut;
use crate::basic_types::PropagationStatusCP;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::statistics::StatisticLogger;

// Allows retrieving the concrete propagator from a `Box<dyn Propagator>` held by the state.
impl_downcast!(Propagator);

/// A propagator removes values from domains which cannot be part of any solution, or reports
/// that the current domains admit no solution at all.
///
/// Only [`Propagator::name`] and [`Propagator::propagate`] are required; the other methods have
/// default implementations.
pub trait Propagator: Downcast {
    /// Return the name of the propagator, used when logging.
    fn name(&self) -> &str;

    /// Narrows the domains through the [`PropagationContextMut`].
    ///
    /// Returns an [`crate::basic_types::Inconsistency`] if a mutation emptied a domain or the
    /// propagator itself found a conflict. The first failure ends the call; the state discards the
    /// remaining queue and the caller is expected to backtrack.
    ///
    /// A propagator does not have to reach a fixed point in a single call; it is enqueued again
    /// whenever a domain it watches changes.
    fn propagate(&mut self, context: PropagationContextMut) -> PropagationStatusCP;

    /// Called after the state backtracked, so that internal structures which are not trailed can
    /// be updated to the restored domains.
    ///
    /// By default this function does nothing.
    fn synchronise(&mut self, _context: PropagationContext) {}

    /// Returns the [`Priority`] of the propagator, used for determining the order in which
    /// propagators are called.
    fn priority(&self) -> Priority {
        Priority::VeryLow
    }

    /// Logs the statistics of the propagator; see [`create_statistics_struct`].
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}

/// The priority of a propagator; higher priorities are called first.
///
/// Cheap propagators should be given a high priority so that they have narrowed the domains
/// before the expensive ones run.
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Priority {
    High = 0,
    Medium = 1,
    Low = 2,
    #[default]
    VeryLow = 3,
}

impl Priority {
    pub(crate) const NUM_LEVELS: usize = 4;
}
