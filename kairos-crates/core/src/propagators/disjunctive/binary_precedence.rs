use crate::basic_types::PropagationStatusCP;
use crate::engine::propagation::Priority;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntervalVariable;
use crate::engine::variables::Literal;
use crate::engine::DomainEvents;

/// The [`PropagatorConstructor`] for the [`DisjunctivePrecedencePropagator`].
#[derive(Clone, Debug)]
pub(crate) struct DisjunctivePrecedencePropagatorArgs {
    pub(crate) a: IntervalVariable,
    pub(crate) b: IntervalVariable,
    /// True iff `a` precedes `b`.
    pub(crate) before: Literal,
    pub(crate) transition_a_to_b: i32,
    pub(crate) transition_b_to_a: i32,
}

impl PropagatorConstructor for DisjunctivePrecedencePropagatorArgs {
    type PropagatorImpl = DisjunctivePrecedencePropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        context.register_interval(&self.a, DomainEvents::BOUNDS);
        context.register_interval(&self.b, DomainEvents::BOUNDS);
        context.register(self.before, DomainEvents::ASSIGN);

        DisjunctivePrecedencePropagator {
            a: self.a,
            b: self.b,
            before: self.before,
            transition_a_to_b: self.transition_a_to_b,
            transition_b_to_a: self.transition_b_to_a,
        }
    }
}

/// Ensures that two present intervals do not overlap: either `a` ends at least
/// `transition_a_to_b` before `b` starts, or `b` ends at least `transition_b_to_a` before `a`
/// starts. The literal `before` is true in the first case.
///
/// Once either interval is absent the propagator has nothing to do.
#[derive(Clone, Debug)]
pub(crate) struct DisjunctivePrecedencePropagator {
    a: IntervalVariable,
    b: IntervalVariable,
    before: Literal,
    transition_a_to_b: i32,
    transition_b_to_a: i32,
}

impl Propagator for DisjunctivePrecedencePropagator {
    fn name(&self) -> &str {
        "DisjunctivePrecedence"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if !context.is_present(&self.a) || !context.is_present(&self.b) {
            return Ok(());
        }

        let (a, b) = (&self.a, &self.b);

        if context.end_min(a) + self.transition_a_to_b > context.start_max(b)
            || context.is_literal_false(&self.before)
        {
            context.assign_literal(&self.before, false)?;
            context.set_start_min(a, context.end_min(b) + self.transition_b_to_a)?;
            context.set_end_max(b, context.start_max(a) - self.transition_b_to_a)?;
        }

        if context.end_min(b) + self.transition_b_to_a > context.start_max(a)
            || context.is_literal_true(&self.before)
        {
            context.assign_literal(&self.before, true)?;
            context.set_start_min(b, context.end_min(a) + self.transition_a_to_b)?;
            context.set_end_max(a, context.start_max(b) - self.transition_a_to_b)?;
        }

        Ok(())
    }
}
