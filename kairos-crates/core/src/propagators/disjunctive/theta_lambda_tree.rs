use std::cmp::max;

use crate::kairos_asserts::kairos_assert_advanced;
use crate::kairos_asserts::kairos_assert_moderate;
use crate::kairos_asserts::kairos_assert_simple;

/// A node in the [`ThetaLambdaTree`] which keeps track of the ECT and sum of processing times of
/// the tasks in its subtree.
///
/// Next to the values for the set Theta, a node keeps track of the ECT and sum of processing times
/// if a single task from the set Lambda can be added to Theta, together with the task which is
/// responsible for each of these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Node {
    /// The sum of the processing times of the tasks in Theta.
    theta_sum: i32,
    /// The earliest completion time of the tasks in Theta.
    theta_ect: i32,
    /// The sum of the processing times if at most one task of Lambda is added to Theta.
    theta_lambda_sum: i32,
    /// The earliest completion time if at most one task of Lambda is added to Theta.
    theta_lambda_ect: i32,
    /// The task of Lambda which is responsible for `theta_lambda_sum`, if any.
    responsible_for_sum: Option<usize>,
    /// The task of Lambda which is responsible for `theta_lambda_ect`, if any.
    responsible_for_ect: Option<usize>,
}

impl Node {
    const EMPTY: Node = Node {
        theta_sum: 0,
        theta_ect: i32::MIN,
        theta_lambda_sum: 0,
        theta_lambda_ect: i32::MIN,
        responsible_for_sum: None,
        responsible_for_ect: None,
    };

    fn new_theta_leaf(ect: i32, processing_time: i32) -> Self {
        Node {
            theta_sum: processing_time,
            theta_ect: ect,
            theta_lambda_sum: processing_time,
            theta_lambda_ect: ect,
            responsible_for_sum: None,
            responsible_for_ect: None,
        }
    }

    fn new_lambda_leaf(task: usize, ect: i32, processing_time: i32) -> Self {
        Node {
            theta_sum: 0,
            theta_ect: i32::MIN,
            theta_lambda_sum: processing_time,
            theta_lambda_ect: ect,
            responsible_for_sum: Some(task),
            responsible_for_ect: Some(task),
        }
    }

    /// Computes the values of a node from the values of its two children.
    fn merge(left: &Node, right: &Node) -> Node {
        let (theta_lambda_sum, responsible_for_sum) = best_of(&[
            (
                left.theta_lambda_sum + right.theta_sum,
                left.responsible_for_sum,
            ),
            (
                left.theta_sum + right.theta_lambda_sum,
                right.responsible_for_sum,
            ),
        ]);

        let (theta_lambda_ect, responsible_for_ect) = best_of(&[
            (right.theta_lambda_ect, right.responsible_for_ect),
            (
                left.theta_ect.saturating_add(right.theta_lambda_sum),
                right.responsible_for_sum,
            ),
            (
                left.theta_lambda_ect.saturating_add(right.theta_sum),
                left.responsible_for_ect,
            ),
        ]);

        Node {
            theta_sum: left.theta_sum + right.theta_sum,
            theta_ect: max(
                right.theta_ect,
                left.theta_ect.saturating_add(right.theta_sum),
            ),
            theta_lambda_sum,
            theta_lambda_ect,
            responsible_for_sum,
            responsible_for_ect,
        }
    }
}

/// Returns the largest candidate; among equal values the first candidate with a responsible task
/// wins, and otherwise the first candidate.
///
/// This intentionally departs from preferring the left subtree on ties: whenever a task of Lambda
/// attains the maximum it is reported as responsible, even if Theta alone reaches the same value.
/// The returned value is the same under either rule.
fn best_of(candidates: &[(i32, Option<usize>)]) -> (i32, Option<usize>) {
    let value = candidates
        .iter()
        .map(|&(value, _)| value)
        .max()
        .unwrap_or(i32::MIN);

    let responsible = candidates
        .iter()
        .filter(|&&(candidate, _)| candidate == value)
        .find_map(|&(_, responsible)| responsible);

    (value, responsible)
}

/// A structure for efficiently calculating the ECT of a set of tasks Theta while allowing one
/// element from another (disjoint) set Lambda to be added.
///
/// The tree is a complete binary tree stored in a flat array; the leaves hold the tasks ordered by
/// non-decreasing earliest start time, which allows the values of the inner nodes to be computed
/// from their children only. Every update recomputes the ancestors of one leaf, so both updates
/// and queries take `O(log n)`.
///
/// # Bibliography
/// \[1\] P. Vilím, ‘Filtering algorithms for the unary resource constraint’, Archives of Control
/// Sciences, vol. 18, no. 2, pp. 159–202, 2008.
#[derive(Debug, Clone, Default)]
pub(crate) struct ThetaLambdaTree {
    nodes: Vec<Node>,
    /// The number of internal nodes; the leaf of rank `r` is stored at this index plus `r`.
    number_of_internal_nodes: usize,
    /// For every task, its rank in the order of earliest start times.
    leaf_of_task: Vec<usize>,
}

impl ThetaLambdaTree {
    /// Empties Theta and Lambda and prepares the tree for the tasks in `tasks_by_est`, which
    /// should be sorted by non-decreasing earliest start time.
    ///
    /// Tasks are identified by an index smaller than `tasks_by_est.len()`.
    pub(crate) fn reset(&mut self, tasks_by_est: &[usize]) {
        let number_of_leaves = tasks_by_est.len().max(1).next_power_of_two();
        self.number_of_internal_nodes = number_of_leaves - 1;

        self.nodes.clear();
        self.nodes
            .resize(self.number_of_internal_nodes + number_of_leaves, Node::EMPTY);

        self.leaf_of_task.clear();
        self.leaf_of_task.resize(tasks_by_est.len(), usize::MAX);
        for (rank, &task) in tasks_by_est.iter().enumerate() {
            self.leaf_of_task[task] = self.number_of_internal_nodes + rank;
        }
    }

    /// Adds `task` to Theta; it is removed from Lambda if it was part of it.
    pub(crate) fn insert_theta(&mut self, task: usize, ect: i32, processing_time: i32) {
        self.set_leaf(task, Node::new_theta_leaf(ect, processing_time));
    }

    /// Adds `task` to Lambda; it is removed from Theta if it was part of it.
    pub(crate) fn insert_lambda(&mut self, task: usize, ect: i32, processing_time: i32) {
        self.set_leaf(task, Node::new_lambda_leaf(task, ect, processing_time));
    }

    /// Moves `task` from Theta to Lambda.
    pub(crate) fn move_theta_to_lambda(&mut self, task: usize) {
        let leaf = self.nodes[self.leaf_of_task[task]];
        kairos_assert_simple!(
            leaf.responsible_for_ect.is_none() && leaf.theta_ect != i32::MIN,
            "Only a task in Theta can be moved to Lambda"
        );

        self.insert_lambda(task, leaf.theta_ect, leaf.theta_sum);
    }

    /// Removes `task` from Theta or Lambda.
    pub(crate) fn remove(&mut self, task: usize) {
        self.set_leaf(task, Node::EMPTY);
    }

    fn set_leaf(&mut self, task: usize, node: Node) {
        let position = self.leaf_of_task[task];
        kairos_assert_simple!(position < self.nodes.len(), "The task is not part of the tree");

        self.nodes[position] = node;
        self.upheap(position);
    }

    /// Recomputes the values of the ancestors of the provided position.
    fn upheap(&mut self, mut position: usize) {
        while position != 0 {
            let parent = (position - 1) / 2;
            self.nodes[parent] =
                Node::merge(&self.nodes[2 * parent + 1], &self.nodes[2 * parent + 2]);
            position = parent;
        }
    }

    /// Returns the earliest completion time of Theta, or [`i32::MIN`] if Theta is empty.
    pub(crate) fn theta_ect(&self) -> i32 {
        self.nodes[0].theta_ect
    }

    /// Returns the sum of processing times of the tasks in Theta.
    #[allow(dead_code, reason = "only queried when checking the tree")]
    pub(crate) fn theta_sum(&self) -> i32 {
        let result = self.nodes[0].theta_sum;
        kairos_assert_moderate!(
            result
                == self.nodes[self.number_of_internal_nodes..]
                    .iter()
                    .map(|leaf| leaf.theta_sum)
                    .sum::<i32>()
        );
        result
    }

    /// Returns the earliest completion time of Theta extended with at most one task of Lambda.
    pub(crate) fn theta_lambda_ect(&self) -> i32 {
        let result = self.nodes[0].theta_lambda_ect;
        kairos_assert_advanced!(result >= self.nodes[0].theta_ect);
        result
    }

    /// Returns the task of Lambda which, added to Theta, yields [`Self::theta_lambda_ect`].
    ///
    /// This is [`None`] if the value is reached without any task from Lambda.
    pub(crate) fn responsible_for_theta_lambda_ect(&self) -> Option<usize> {
        self.nodes[0].responsible_for_ect
    }

    /// Returns the task of Lambda which maximises the sum of processing times when added to Theta.
    #[allow(dead_code, reason = "only queried when checking the tree")]
    pub(crate) fn responsible_for_theta_lambda_sum(&self) -> Option<usize> {
        self.nodes[0].responsible_for_sum
    }
}
