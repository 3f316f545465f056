//! Counters kept by the state and the propagators, and the logging of them.
//!
//! Nothing is written until [`configure_statistic_logging`] has been called; afterwards
//! [`State::log_statistics`](crate::State::log_statistics) writes one line per counter.
pub(crate) mod statistic_logger;
pub(crate) mod statistic_logging;

use std::fmt::Display;

pub use statistic_logger::StatisticLogger;
pub use statistic_logging::configure_statistic_logging;
pub use statistic_logging::should_log_statistics;
pub use statistic_logging::StatisticOptions;

/// A value, or a group of values, which can be written as statistics.
///
/// Structs of counters are best created with [`create_statistics_struct!`].
pub trait Statistic {
    fn log(&self, statistic_logger: StatisticLogger);
}

impl<Value: Display> Statistic for Value {
    fn log(&self, statistic_logger: StatisticLogger) {
        statistic_logger.log(self);
    }
}

/// Generates a struct of counters which logs every field under its own name.
///
/// # Example
/// ```rust
/// # use kairos_core::create_statistics_struct;
/// # use kairos_core::statistics::Statistic;
/// create_statistics_struct!(Statistics {
///     number_of_calls: usize
/// });
///
/// let statistics = Statistics::default();
///
/// assert_eq!(statistics.number_of_calls, 0);
/// ```
#[macro_export]
macro_rules! create_statistics_struct {
    ($(#[$struct_documentation:meta])* $name:ident { $($(#[$variable_documentation:meta])* $field:ident : $type:ident),+ $(,)? }) => {
        $(#[$struct_documentation])*
        #[derive(Default, Debug, Copy, Clone)]
        pub(crate) struct $name {
            $($(#[$variable_documentation])* pub(crate) $field: $type),+
        }

        impl $crate::statistics::Statistic for $name {
            fn log(&self, statistic_logger: $crate::statistics::StatisticLogger) {
                $(self.$field.log(statistic_logger.attach_to_prefix(stringify!($field),)));+
            }
        }
    };
}
