//! The variable types which propagators read and narrow.
mod constant;
mod domain_id;
mod integer_variable;
mod interval_variable;
mod literal;

pub use domain_id::DomainId;
pub use integer_variable::IntegerVariable;
pub use interval_variable::IntervalVariable;
pub(crate) use interval_variable::IntervalBounds;
pub use literal::Literal;
