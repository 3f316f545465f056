use std::fmt::Debug;

use super::sweep_line::SweepLine;
use crate::basic_types::ResourceInference;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::engine::EmptyDomain;
use crate::propagators::cumulative::Activity;

/// The side of the resource bound enforced by a `CumulativeSweepPropagator`.
///
/// Both variants share the event generation and the sweep; they differ in which heights count as
/// certain or optimistic usage, and in the direction of every comparison against the bound.
pub(crate) trait CapacityBound: Clone + Copy + Debug + 'static {
    /// The name under which the propagator is reported.
    const NAME: &'static str;
    /// The inference reported when the bound is violated at some instant.
    const VIOLATION: ResourceInference;

    /// The height carried by the events over the compulsory part of a present activity, if any.
    fn compulsory_height(&self, height_min: i32, height_max: i32) -> Option<i32>;

    /// The height carried by the events over the whole window of a non-absent activity, if any.
    fn optimistic_height(&self, height_min: i32, height_max: i32) -> Option<i32>;

    /// Whether a present activity with a compulsory part is counted as certainly running.
    fn counts_as_overlapping(&self, _height_max: i32) -> bool {
        false
    }

    fn is_violated(&self, sweep_line: &SweepLine) -> bool;

    /// Whether running `task` at any point of the current window would violate the bound.
    fn is_forbidden(
        &self,
        sweep_line: &SweepLine,
        task: usize,
        height_min: i32,
        height_max: i32,
    ) -> bool;

    /// Whether the bound can only be met over the current window when `task` covers all of it.
    fn is_mandatory(&self, sweep_line: &SweepLine, task: usize) -> bool;

    /// Narrows the height of an activity which certainly runs over the current window, given the
    /// height of the profile without it.
    fn prune_height<Var: IntegerVariable>(
        &self,
        context: &mut PropagationContextMut,
        activity: &Activity<Var>,
        height_of_others: i32,
    ) -> Result<(), EmptyDomain>;
}

/// At every instant the summed height of the running activities is at most the capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MaxCapacity(pub(crate) i32);

impl CapacityBound for MaxCapacity {
    const NAME: &'static str = "CumulativeSweepMax";
    const VIOLATION: ResourceInference = ResourceInference::CapacityOverflow;

    fn compulsory_height(&self, height_min: i32, _height_max: i32) -> Option<i32> {
        (height_min > 0).then_some(height_min)
    }

    fn optimistic_height(&self, height_min: i32, _height_max: i32) -> Option<i32> {
        (height_min < 0).then_some(height_min)
    }

    fn is_violated(&self, sweep_line: &SweepLine) -> bool {
        sweep_line.sum_height > self.0
    }

    fn is_forbidden(
        &self,
        sweep_line: &SweepLine,
        task: usize,
        height_min: i32,
        _height_max: i32,
    ) -> bool {
        sweep_line.height_without(task) + height_min > self.0
    }

    fn is_mandatory(&self, sweep_line: &SweepLine, task: usize) -> bool {
        sweep_line.height_without(task) > self.0
    }

    fn prune_height<Var: IntegerVariable>(
        &self,
        context: &mut PropagationContextMut,
        activity: &Activity<Var>,
        height_of_others: i32,
    ) -> Result<(), EmptyDomain> {
        let remaining = self.0 - height_of_others;
        if context.is_optional(&activity.interval) && remaining < context.lower_bound(&activity.height)
        {
            context.set_absent(&activity.interval)
        } else {
            context.set_upper_bound(&activity.height, remaining)
        }
    }
}

/// At every instant where at least one activity runs, the summed height of the running
/// activities is at least the minimum capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MinCapacity(pub(crate) i32);

impl CapacityBound for MinCapacity {
    const NAME: &'static str = "CumulativeSweepMin";
    const VIOLATION: ResourceInference = ResourceInference::CapacityUnderflow;

    fn compulsory_height(&self, _height_min: i32, height_max: i32) -> Option<i32> {
        (height_max < 0).then_some(height_max)
    }

    fn optimistic_height(&self, _height_min: i32, height_max: i32) -> Option<i32> {
        (height_max > 0).then_some(height_max)
    }

    fn counts_as_overlapping(&self, height_max: i32) -> bool {
        height_max < self.0
    }

    fn is_violated(&self, sweep_line: &SweepLine) -> bool {
        sweep_line.num_overlapping > 0 && sweep_line.sum_height < self.0
    }

    fn is_forbidden(
        &self,
        sweep_line: &SweepLine,
        task: usize,
        _height_min: i32,
        height_max: i32,
    ) -> bool {
        sweep_line.height_without(task) + height_max < self.0
    }

    fn is_mandatory(&self, sweep_line: &SweepLine, task: usize) -> bool {
        sweep_line.num_overlapping > 0 && sweep_line.height_without(task) < self.0
    }

    fn prune_height<Var: IntegerVariable>(
        &self,
        context: &mut PropagationContextMut,
        activity: &Activity<Var>,
        height_of_others: i32,
    ) -> Result<(), EmptyDomain> {
        if !context.is_present(&activity.interval) {
            return Ok(());
        }
        context.set_lower_bound(&activity.height, self.0 - height_of_others)
    }
}
