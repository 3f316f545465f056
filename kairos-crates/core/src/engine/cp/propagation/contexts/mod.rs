mod propagation_context;

pub use propagation_context::HasAssignments;
pub(crate) use propagation_context::HasTrailedValues;
pub use propagation_context::PropagationContext;
pub use propagation_context::PropagationContextMut;
pub use propagation_context::ReadDomains;
