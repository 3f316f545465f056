use std::fmt::Display;

/// The options of the global no-overlap propagator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DisjunctiveOptions {
    /// Determines how often the tasks which cannot overlap any other task are removed from the
    /// set of tasks the propagator reasons over.
    pub compaction: CompactionPolicy,
}

/// How often the active tasks of the global no-overlap propagator are compacted.
///
/// Compaction only removes tasks whose window does not overlap the window of any other active
/// task. These tasks can never be involved in a conflict below the current node, so the policy
/// only influences how much work a call does and never its result.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CompactionPolicy {
    /// Compact on every call.
    #[default]
    EveryCall,
    /// Compact once every `period` calls.
    Throttled { period: u32 },
    /// Never compact; only absent tasks are removed.
    Never,
}

impl CompactionPolicy {
    /// Whether the call with the given (1-based) number should compact the active tasks.
    pub(crate) fn should_compact(&self, call_number: u64) -> bool {
        match self {
            CompactionPolicy::EveryCall => true,
            CompactionPolicy::Throttled { period } => {
                *period != 0 && call_number % u64::from(*period) == 0
            }
            CompactionPolicy::Never => false,
        }
    }
}

impl Display for CompactionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompactionPolicy::EveryCall => write!(f, "every-call"),
            CompactionPolicy::Throttled { period } => write!(f, "throttled-{period}"),
            CompactionPolicy::Never => write!(f, "never"),
        }
    }
}
