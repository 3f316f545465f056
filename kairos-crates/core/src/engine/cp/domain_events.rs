use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// A change to the bounds of an integer domain.
#[derive(Debug, EnumSetType, Hash)]
pub enum DomainEvent {
    /// The lower bound was tightened.
    LowerBound,
    /// The upper bound was tightened.
    UpperBound,
    /// The domain became a single value.
    Assign,
}

/// The set of [`DomainEvent`]s on which a propagator wants to be enqueued.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DomainEvents {
    events: EnumSet<DomainEvent>,
}

impl DomainEvents {
    /// Both lower and upper bound tightening.
    pub const BOUNDS: DomainEvents =
        DomainEvents::new(enum_set!(DomainEvent::LowerBound | DomainEvent::UpperBound));
    /// Any change to the domain.
    pub const ANY: DomainEvents = DomainEvents::new(enum_set!(
        DomainEvent::LowerBound | DomainEvent::UpperBound | DomainEvent::Assign
    ));
    pub const LOWER_BOUND: DomainEvents = DomainEvents::new(enum_set!(DomainEvent::LowerBound));
    pub const UPPER_BOUND: DomainEvents = DomainEvents::new(enum_set!(DomainEvent::UpperBound));
    /// Only the domain becoming fixed.
    pub const ASSIGN: DomainEvents = DomainEvents::new(enum_set!(DomainEvent::Assign));

    const fn new(events: EnumSet<DomainEvent>) -> DomainEvents {
        DomainEvents { events }
    }

    pub(crate) fn events(&self) -> EnumSet<DomainEvent> {
        self.events
    }
}
