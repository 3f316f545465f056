use std::fmt::Display;
use std::fmt::Formatter;

use crate::engine::EmptyDomain;

/// The result of invoking a propagator. The propagation either succeeds (possibly after
/// narrowing domains) or identifies an inconsistency, after which the caller should backtrack.
pub type PropagationStatusCP = Result<(), Inconsistency>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    /// A domain mutation would have emptied a domain.
    EmptyDomain,
    /// The propagator detected that the current domains cannot be extended to a solution.
    Conflict(PropagatorConflict),
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}

impl From<PropagatorConflict> for Inconsistency {
    fn from(conflict: PropagatorConflict) -> Self {
        Inconsistency::Conflict(conflict)
    }
}

/// A conflict stated by a propagator. Only conflicts which are _not_ an empty domain are described
/// with this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropagatorConflict {
    /// The reasoning which identified the conflict.
    pub inference: ResourceInference,
    /// The time point at which the conflict was found, when the reasoning is time-based.
    pub time: Option<i32>,
}

/// The different kinds of resource reasoning which can detect a conflict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceInference {
    /// The certain resource usage at some instant exceeds the maximum capacity.
    CapacityOverflow,
    /// The possible resource usage at an instant where activities certainly run is below the
    /// minimum capacity.
    CapacityUnderflow,
    /// A set of activities cannot be processed within its time window on a unary resource.
    OverloadCheck,
    /// Edge-finding found an activity without a possible position.
    EdgeFinding,
}

impl Display for ResourceInference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceInference::CapacityOverflow => write!(f, "capacity overflow"),
            ResourceInference::CapacityUnderflow => write!(f, "capacity underflow"),
            ResourceInference::OverloadCheck => write!(f, "overload check"),
            ResourceInference::EdgeFinding => write!(f, "edge-finding"),
        }
    }
}

/// Whether a call to a propagator changed any domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagationOutcome {
    NoChange,
    Changed,
}
