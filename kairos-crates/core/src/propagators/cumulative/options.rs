use std::fmt::Display;

/// Options for the cumulative constraint with a maximum capacity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CumulativeOptions {
    /// The propagator which enforces the constraint; the sweep is used by default.
    pub propagation_method: CumulativePropagationMethod,
}

impl CumulativeOptions {
    pub fn new(propagation_method: CumulativePropagationMethod) -> Self {
        CumulativeOptions { propagation_method }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CumulativePropagationMethod {
    /// The generalised sweep over the compulsory and optimistic profiles.
    #[default]
    Sweep,
    /// Reasons per time point over the compulsory parts only; slow, and only supports
    /// non-negative heights.
    TimePointDecomposition,
}

impl Display for CumulativePropagationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CumulativePropagationMethod::Sweep => write!(f, "sweep"),
            CumulativePropagationMethod::TimePointDecomposition => {
                write!(f, "time-point-decomposition")
            }
        }
    }
}
