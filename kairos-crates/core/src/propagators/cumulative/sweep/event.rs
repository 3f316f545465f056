/// What an [`Event`] does to the sweep line when it is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum EventKind {
    /// Adds `magnitude` to the height of the profile.
    Profile,
    /// Adds `magnitude` to the number of activities which certainly run.
    Check,
    /// Marks the activity as a candidate for pruning from this time onwards.
    Pruning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Event {
    pub(super) kind: EventKind,
    pub(super) task: usize,
    pub(super) time: i32,
    pub(super) magnitude: i32,
}

impl Event {
    pub(super) fn profile(task: usize, time: i32, magnitude: i32) -> Self {
        Event {
            kind: EventKind::Profile,
            task,
            time,
            magnitude,
        }
    }

    pub(super) fn check(task: usize, time: i32, magnitude: i32) -> Self {
        Event {
            kind: EventKind::Check,
            task,
            time,
            magnitude,
        }
    }

    pub(super) fn pruning(task: usize, time: i32) -> Self {
        Event {
            kind: EventKind::Pruning,
            task,
            time,
            magnitude: 0,
        }
    }
}
