use std::fmt;

use crate::state::{LineType, Spacing, StrokeCounts};

/// Total installation cost in currency units.
///
/// Displays with exactly two decimals, e.g. `22.00`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Estimate(f64);

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Sum of `count * feet_per_bulb * rate` over every line type
pub fn estimate(counts: &StrokeCounts, spacing: Spacing) -> Estimate {
    let feet = spacing.feet_per_bulb();
    let total = LineType::ALL
        .iter()
        .map(|&line_type| f64::from(counts.get(line_type)) * feet * line_type.rate_per_foot())
        .sum();
    Estimate(total)
}

/// Text shown in the readout
pub fn readout(estimate: Estimate) -> String {
    format!("Estimated Cost: ${estimate}")
}
