use super::theta_lambda_tree::ThetaLambdaTree;
use crate::basic_types::ResourceInference;
use crate::kairos_asserts::kairos_assert_eq_simple;
use crate::kairos_asserts::kairos_assert_extreme;

/// The result of a single run of the [`LeftToRightFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FilterOutcome {
    NoChange,
    Change,
    /// The tasks cannot be scheduled without overlap; the inference names the rule which found
    /// it.
    Inconsistency(ResourceInference),
}

/// Filters the earliest start times and the latest end times of tasks on a unary resource.
///
/// A run applies overload checking, detectable precedences, not-last and edge-finding, in that
/// order, each rule starting from the bounds found by the previous one. Earliest start times are
/// only pushed by detectable precedences and edge-finding while latest end times are only pulled
/// in by not-last; running the filter on the mirrored tasks gives not-first and the
/// right-to-left variants of the other rules.
///
/// The filter works on plain arrays so that it can be tested and mirrored without variables. All
/// buffers are kept between runs.
///
/// # Bibliography
/// \[1\] P. Vilím, ‘O(n log n) filtering algorithms for unary resource constraint’, CPAIOR 2004.
#[derive(Debug, Clone, Default)]
pub(crate) struct LeftToRightFilter {
    duration: Vec<i32>,
    start_min: Vec<i32>,
    end_max: Vec<i32>,
    /// Scratch space for the bounds found by the rule which is running.
    updated: Vec<i32>,
    by_est: Vec<usize>,
    by_ect: Vec<usize>,
    by_lst: Vec<usize>,
    by_lct: Vec<usize>,
    in_theta: Vec<bool>,
    tree: ThetaLambdaTree,
}

fn sort_tasks(order: &mut Vec<usize>, number_of_tasks: usize, key: impl Fn(usize) -> i32) {
    order.clear();
    order.extend(0..number_of_tasks);
    order.sort_by_key(|&task| key(task));
}

impl LeftToRightFilter {
    /// The earliest start times found by the last run.
    pub(crate) fn start_min(&self) -> &[i32] {
        &self.start_min
    }

    /// The latest end times found by the last run.
    pub(crate) fn end_max(&self) -> &[i32] {
        &self.end_max
    }

    /// Filters the tasks where task `i` has earliest start `start_min[i]`, processing time
    /// `duration[i]` and latest end `end_max[i]`.
    pub(crate) fn filter(
        &mut self,
        start_min: &[i32],
        duration: &[i32],
        end_max: &[i32],
    ) -> FilterOutcome {
        kairos_assert_eq_simple!(start_min.len(), duration.len());
        kairos_assert_eq_simple!(duration.len(), end_max.len());

        self.start_min.clear();
        self.start_min.extend_from_slice(start_min);
        self.duration.clear();
        self.duration.extend_from_slice(duration);
        self.end_max.clear();
        self.end_max.extend_from_slice(end_max);

        if self.overload_check().is_err() {
            return FilterOutcome::Inconsistency(ResourceInference::OverloadCheck);
        }
        self.detectable_precedences();
        self.not_last();
        if self.edge_finding().is_err() {
            return FilterOutcome::Inconsistency(ResourceInference::OverloadCheck);
        }

        let number_of_tasks = self.duration.len();
        if (0..number_of_tasks)
            .any(|task| self.start_min[task] + self.duration[task] > self.end_max[task])
        {
            return FilterOutcome::Inconsistency(ResourceInference::EdgeFinding);
        }

        kairos_assert_extreme!(
            (0..number_of_tasks).all(|task| {
                self.start_min[task] >= start_min[task] && self.end_max[task] <= end_max[task]
            }),
            "The filter only narrows the windows"
        );

        if self.start_min == start_min && self.end_max == end_max {
            FilterOutcome::NoChange
        } else {
            FilterOutcome::Change
        }
    }

    fn ect(&self, task: usize) -> i32 {
        self.start_min[task] + self.duration[task]
    }

    fn lst(&self, task: usize) -> i32 {
        self.end_max[task] - self.duration[task]
    }

    fn insert_theta(&mut self, task: usize) {
        self.tree
            .insert_theta(task, self.ect(task), self.duration[task]);
        self.in_theta[task] = true;
    }

    /// Prepares the tree for a rule, with empty Theta and Lambda.
    fn reset_tree(&mut self) {
        let number_of_tasks = self.duration.len();
        sort_tasks(&mut self.by_est, number_of_tasks, |task| {
            self.start_min[task]
        });
        self.tree.reset(&self.by_est);

        self.in_theta.clear();
        self.in_theta.resize(number_of_tasks, false);
    }

    /// Checks that no set of tasks which has to end before the latest end of one of its members
    /// takes too long to process.
    fn overload_check(&mut self) -> Result<(), ()> {
        let number_of_tasks = self.duration.len();
        self.reset_tree();
        sort_tasks(&mut self.by_lct, number_of_tasks, |task| self.end_max[task]);

        for index in 0..number_of_tasks {
            let task = self.by_lct[index];
            self.insert_theta(task);
            if self.tree.theta_ect() > self.end_max[task] {
                return Err(());
            }
        }

        Ok(())
    }

    /// A task `j` which cannot start after the earliest completion of task `i` has to precede it;
    /// `i` then starts after the completion of all of those tasks.
    fn detectable_precedences(&mut self) {
        let number_of_tasks = self.duration.len();
        self.reset_tree();
        sort_tasks(&mut self.by_ect, number_of_tasks, |task| {
            self.start_min[task] + self.duration[task]
        });
        sort_tasks(&mut self.by_lst, number_of_tasks, |task| {
            self.end_max[task] - self.duration[task]
        });
        self.updated.clone_from(&self.start_min);

        let mut next = 0;
        for index in 0..number_of_tasks {
            let task = self.by_ect[index];
            while next < number_of_tasks && self.ect(task) > self.lst(self.by_lst[next]) {
                self.insert_theta(self.by_lst[next]);
                next += 1;
            }

            let was_in_theta = self.in_theta[task];
            if was_in_theta {
                self.tree.remove(task);
            }
            self.updated[task] = self.updated[task].max(self.tree.theta_ect());
            if was_in_theta {
                self.insert_theta(task);
            }
        }

        std::mem::swap(&mut self.start_min, &mut self.updated);
    }

    /// If the tasks which have to start before the latest end of task `i` cannot all be completed
    /// before the latest start of `i`, then `i` is not the last of them and ends before the
    /// latest of their latest starts.
    fn not_last(&mut self) {
        let number_of_tasks = self.duration.len();
        self.reset_tree();
        sort_tasks(&mut self.by_lct, number_of_tasks, |task| self.end_max[task]);
        sort_tasks(&mut self.by_lst, number_of_tasks, |task| {
            self.end_max[task] - self.duration[task]
        });
        self.updated.clone_from(&self.end_max);

        let mut next = 0;
        let mut last_inserted: Option<usize> = None;
        let mut before_last_inserted: Option<usize> = None;
        for index in 0..number_of_tasks {
            let task = self.by_lct[index];
            while next < number_of_tasks && self.end_max[task] > self.lst(self.by_lst[next]) {
                let inserted = self.by_lst[next];
                self.insert_theta(inserted);
                before_last_inserted = last_inserted;
                last_inserted = Some(inserted);
                next += 1;
            }

            let was_in_theta = self.in_theta[task];
            if was_in_theta {
                self.tree.remove(task);
            }
            if self.tree.theta_ect() > self.lst(task) {
                // The latest start among the other members of Theta.
                let latest = if last_inserted == Some(task) {
                    before_last_inserted
                } else {
                    last_inserted
                };
                if let Some(other) = latest {
                    self.updated[task] = self.updated[task].min(self.lst(other));
                }
            }
            if was_in_theta {
                self.insert_theta(task);
            }
        }

        std::mem::swap(&mut self.end_max, &mut self.updated);
    }

    /// Processes the tasks by non-increasing latest end; a task moved to Lambda which cannot be
    /// added to the remaining tasks without exceeding their latest end has to come after all of
    /// them.
    fn edge_finding(&mut self) -> Result<(), ()> {
        let number_of_tasks = self.duration.len();
        self.reset_tree();
        sort_tasks(&mut self.by_lct, number_of_tasks, |task| self.end_max[task]);
        self.updated.clone_from(&self.start_min);

        for task in 0..number_of_tasks {
            self.insert_theta(task);
        }

        for index in (1..number_of_tasks).rev() {
            let task = self.by_lct[index];
            if self.tree.theta_ect() > self.end_max[task] {
                return Err(());
            }

            self.tree.move_theta_to_lambda(task);

            let next_end_max = self.end_max[self.by_lct[index - 1]];
            while self.tree.theta_lambda_ect() > next_end_max {
                let Some(responsible) = self.tree.responsible_for_theta_lambda_ect() else {
                    break;
                };
                self.updated[responsible] = self.updated[responsible].max(self.tree.theta_ect());
                self.tree.remove(responsible);
            }
        }

        std::mem::swap(&mut self.start_min, &mut self.updated);
        Ok(())
    }
}
