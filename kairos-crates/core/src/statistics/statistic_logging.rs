//! The process-wide destination of statistics.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stdout;
use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;

/// Where and how statistics are written: every statistic becomes a line `{prefix} {name}={value}`
/// and a block of statistics can be closed by a fixed line.
pub struct StatisticOptions {
    prefix: &'static str,
    closing_line: Option<&'static str>,
    casing: Option<Case>,
    writer: Box<dyn Write + Send + Sync>,
}

impl StatisticOptions {
    /// Writes to stdout with names as they are given.
    pub fn new(prefix: &'static str) -> Self {
        StatisticOptions {
            prefix,
            closing_line: None,
            casing: None,
            writer: Box::new(stdout()),
        }
    }

    pub fn with_closing_line(mut self, closing_line: &'static str) -> Self {
        self.closing_line = Some(closing_line);
        self
    }

    pub fn with_casing(mut self, casing: Case) -> Self {
        self.casing = Some(casing);
        self
    }

    pub fn with_writer(mut self, writer: impl Write + Send + Sync + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("prefix", &self.prefix)
            .field("closing_line", &self.closing_line)
            .field("casing", &self.casing)
            .finish_non_exhaustive()
    }
}

static DESTINATION: OnceLock<Mutex<StatisticOptions>> = OnceLock::new();

/// Turns on the logging of statistics. Only the first call has an effect; returns whether this
/// call was it.
pub fn configure_statistic_logging(options: StatisticOptions) -> bool {
    DESTINATION.set(Mutex::new(options)).is_ok()
}

/// Whether [`configure_statistic_logging`] has been called.
pub fn should_log_statistics() -> bool {
    DESTINATION.get().is_some()
}

pub(crate) fn write_statistic(name: &str, value: impl Display) {
    let Some(Ok(mut destination)) = DESTINATION.get().map(Mutex::lock) else {
        return;
    };

    let name = match destination.casing {
        Some(casing) => name.to_case(casing),
        None => name.to_owned(),
    };
    let prefix = destination.prefix;
    let _ = writeln!(destination.writer, "{prefix} {name}={value}");
}

pub(crate) fn write_closing_line() {
    let Some(Ok(mut destination)) = DESTINATION.get().map(Mutex::lock) else {
        return;
    };

    if let Some(closing_line) = destination.closing_line {
        let _ = writeln!(destination.writer, "{closing_line}");
    }
}
