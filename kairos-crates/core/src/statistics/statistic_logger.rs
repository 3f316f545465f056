use std::fmt::Display;

use super::statistic_logging::write_statistic;

/// Names statistics by a prefix such as `CumulativeSweepMax_2`; nested statistics extend it.
#[derive(Debug, Clone, Default)]
pub struct StatisticLogger {
    name_prefix: String,
}

impl StatisticLogger {
    pub fn new(name_prefix: impl Display) -> Self {
        StatisticLogger {
            name_prefix: name_prefix.to_string(),
        }
    }

    pub fn attach_to_prefix(&self, addition: impl Display) -> Self {
        StatisticLogger {
            name_prefix: format!("{}_{addition}", self.name_prefix),
        }
    }

    /// Writes `value` under the current name.
    pub fn log(&self, value: impl Display) {
        write_statistic(&self.name_prefix, value);
    }
}
