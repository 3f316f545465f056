use crate::engine::variables::IntervalVariable;

/// An activity on a cumulative resource: while `interval` runs it uses `height` units of the
/// resource. A negative height means that the activity produces the resource instead.
///
/// The height is any [`IntegerVariable`](crate::engine::variables::IntegerVariable), so a
/// constant `i32` can be used when it is known up front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Activity<Var> {
    pub interval: IntervalVariable,
    pub height: Var,
}

impl<Var> Activity<Var> {
    pub fn new(interval: IntervalVariable, height: Var) -> Self {
        Activity { interval, height }
    }
}
