use thiserror::Error;

/// Errors raised when a constraint is created with static arguments that can never be satisfied
/// or that the propagators do not support.
///
/// These are reported before any propagation takes place.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    #[error("The capacity of the resource should be non-negative but was {0}")]
    NegativeCapacity(i32),
    #[error("Activity {activity} has a minimum height ({min}) which exceeds its maximum height ({max})")]
    InvalidHeightRange { activity: usize, min: i32, max: i32 },
    #[error("Activity {activity} has a negative height ({min}) which is not supported by this propagator")]
    NegativeHeight { activity: usize, min: i32 },
    #[error("Transition times should be non-negative but were ({from_a_to_b}, {from_b_to_a})")]
    NegativeTransitionTime { from_a_to_b: i32, from_b_to_a: i32 },
    #[error("A resource constraint requires at least one activity")]
    EmptyActivitySet,
    #[error("Adding the constraint failed because the state is infeasible")]
    InfeasibleState,
}
