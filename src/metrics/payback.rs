//! Discounted payback period

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schedule::{TimeGrid, YearSeries};

/// Cumulative discounted cash flow counts as recovered above `-PAYBACK_TOLERANCE`
pub const PAYBACK_TOLERANCE: f64 = 1e-9;

/// First year in which cumulative discounted cash flow is non-negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "year")]
pub enum Payback {
    /// Year 0 alone is already non-negative
    Immediate,
    Year(u32),
    /// Not recovered within the horizon
    Never,
}

impl Payback {
    pub fn year(&self) -> Option<u32> {
        match self {
            Payback::Immediate => Some(0),
            Payback::Year(year) => Some(*year),
            Payback::Never => None,
        }
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payback::Immediate => write!(f, "Year 0 (Immediate)"),
            Payback::Year(year) => write!(f, "Year {}", year),
            Payback::Never => write!(f, "Never"),
        }
    }
}

fn discounted_cumulative(cashflows: &YearSeries, grid: &TimeGrid) -> YearSeries {
    cashflows
        .zip_with(grid.discount_factors(), |cf, df| cf * df)
        .cumulative()
}

/// Smallest year whose cumulative discounted cash flow reaches zero
pub fn discounted_payback(cashflows: &YearSeries, grid: &TimeGrid) -> Payback {
    let cumulative = discounted_cumulative(cashflows, grid);
    let recovered = cumulative
        .iter()
        .find(|(_, total)| *total >= -PAYBACK_TOLERANCE);
    match recovered {
        Some((0, _)) => Payback::Immediate,
        Some((year, _)) => Payback::Year(year),
        None => Payback::Never,
    }
}

/// Payback in fractional years, interpolating linearly within the year of recovery
///
/// Not part of the default result; offered for finer reporting.
pub fn discounted_payback_fractional(cashflows: &YearSeries, grid: &TimeGrid) -> Option<f64> {
    let cumulative = discounted_cumulative(cashflows, grid);
    let year = discounted_payback(cashflows, grid).year()?;
    if year == 0 {
        return Some(0.0);
    }

    let shortfall = -cumulative[year - 1];
    let recovered_in_year = cumulative[year] - cumulative[year - 1];
    if recovered_in_year <= 0.0 {
        return Some(year as f64);
    }
    Some((year - 1) as f64 + (shortfall / recovered_in_year).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_payback_year() {
        let grid = TimeGrid::new(0.0, 4).unwrap();
        let flows = YearSeries::from_values(vec![-100.0, 30.0, 30.0, 40.0, 40.0]);
        assert_eq!(discounted_payback(&flows, &grid), Payback::Year(3));
        assert_eq!(discounted_payback(&flows, &grid).to_string(), "Year 3");
    }

    #[test]
    fn test_immediate_and_never() {
        let grid = TimeGrid::new(0.05, 3).unwrap();
        let positive = YearSeries::from_values(vec![10.0, 1.0, 1.0, 1.0]);
        assert_eq!(discounted_payback(&positive, &grid), Payback::Immediate);
        assert_eq!(Payback::Immediate.to_string(), "Year 0 (Immediate)");

        let losing = YearSeries::from_values(vec![-100.0, 10.0, 10.0, 10.0]);
        assert_eq!(discounted_payback(&losing, &grid), Payback::Never);
        assert_eq!(Payback::Never.to_string(), "Never");
    }

    #[test]
    fn test_tolerance_absorbs_rounding_noise() {
        let grid = TimeGrid::new(0.0, 2).unwrap();
        let flows = YearSeries::from_values(vec![-0.3, 0.1, 0.2 - 1e-12]);
        assert_eq!(discounted_payback(&flows, &grid), Payback::Year(2));
    }

    #[test]
    fn test_discounting_delays_payback() {
        let flows = YearSeries::from_values(vec![-100.0, 30.0, 30.0, 30.0, 30.0, 30.0]);
        let mut previous = 0;
        for rate in [0.0, 0.05, 0.10, 0.15] {
            let grid = TimeGrid::new(rate, 5).unwrap();
            let year = discounted_payback(&flows, &grid).year().unwrap();
            assert!(year >= previous);
            previous = year;
        }
        assert_eq!(previous, 5);
    }

    #[test]
    fn test_fractional_payback() {
        let grid = TimeGrid::new(0.0, 3).unwrap();
        let flows = YearSeries::from_values(vec![-100.0, 40.0, 40.0, 40.0]);
        let fractional = discounted_payback_fractional(&flows, &grid).unwrap();
        assert_abs_diff_eq!(fractional, 2.5, epsilon = 1e-12);
    }
}
