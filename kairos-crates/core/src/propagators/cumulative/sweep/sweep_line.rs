/// The state of the sweep between two consecutive event times.
#[derive(Debug, Clone, Default)]
pub(crate) struct SweepLine {
    /// The height of the profile over the current window.
    pub(crate) sum_height: i32,
    /// The share of every activity in `sum_height`.
    pub(crate) contributions: Vec<i32>,
    /// The number of activities whose compulsory part covers the current window.
    pub(crate) num_overlapping: i32,
}

impl SweepLine {
    pub(crate) fn reset(&mut self, number_of_tasks: usize) {
        self.sum_height = 0;
        self.num_overlapping = 0;
        self.contributions.clear();
        self.contributions.resize(number_of_tasks, 0);
    }

    pub(crate) fn add_to_profile(&mut self, task: usize, magnitude: i32) {
        self.sum_height += magnitude;
        self.contributions[task] += magnitude;
    }

    /// The height of the profile without the share of `task`.
    pub(crate) fn height_without(&self, task: usize) -> i32 {
        self.sum_height - self.contributions[task]
    }
}
