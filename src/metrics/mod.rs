//! Investment return metrics over an assembled cash flow series
//!
//! NPV is total over the reals. IRR and MIRR can fail; a failure is reported as
//! [`MetricOutcome::NotAvailable`] with a reason rather than aborting the
//! evaluation.

mod irr;
mod mirr;
mod payback;

pub use irr::{NewtonBisection, RootSolver, xnpv};
pub use mirr::mirr;
pub use payback::{Payback, discounted_payback, discounted_payback_fractional, PAYBACK_TOLERANCE};

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::MetricError;
use crate::schedule::{TimeGrid, YearSeries};

/// NPV of a series on the grid's discount factors
pub fn npv(cashflows: &YearSeries, grid: &TimeGrid) -> f64 {
    grid.present_value(cashflows)
}

/// NPV of periodic cash flows with the first flow undiscounted
pub fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// A metric value, or why it could not be computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricOutcome {
    Available { value: f64 },
    NotAvailable { reason: String },
}

impl MetricOutcome {
    pub fn value(&self) -> Option<f64> {
        match self {
            MetricOutcome::Available { value } => Some(*value),
            MetricOutcome::NotAvailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.value().is_some()
    }

    /// Percent with two decimals, or "n/a"
    pub fn display_pct(&self) -> String {
        match self.value() {
            Some(value) => format!("{:.2}%", value * 100.0),
            None => "n/a".to_string(),
        }
    }
}

impl From<Result<f64, MetricError>> for MetricOutcome {
    fn from(result: Result<f64, MetricError>) -> Self {
        match result {
            Ok(value) => MetricOutcome::Available { value },
            Err(e) => MetricOutcome::NotAvailable {
                reason: e.to_string(),
            },
        }
    }
}

/// IRR of a year series dated from `start`
pub fn irr<S: RootSolver + ?Sized>(
    cashflows: &YearSeries,
    grid: &TimeGrid,
    start: NaiveDate,
    solver: &S,
) -> Result<f64, MetricError> {
    let dates = grid.calendar_dates(start)?;
    solver.solve(cashflows.values(), &dates)
}

/// NPV, IRR, MIRR and discounted payback of one cash flow series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeholderMetrics {
    pub npv: f64,
    pub irr: MetricOutcome,
    pub mirr: MetricOutcome,
    pub discounted_payback: Payback,
}

impl StakeholderMetrics {
    /// Compute every metric for `cashflows`; MIRR uses the discount rate for
    /// both financing and reinvestment
    pub fn compute<S: RootSolver + ?Sized>(
        label: &str,
        cashflows: &YearSeries,
        grid: &TimeGrid,
        start: NaiveDate,
        solver: &S,
    ) -> Self {
        let irr_result = irr(cashflows, grid, start, solver);
        if let Err(e) = &irr_result {
            if e.is_numerical() {
                warn!("{} IRR not available: {}", label, e);
            } else {
                debug!("{} IRR not available: {}", label, e);
            }
        }

        let rate = grid.discount_rate();
        let mirr_result = mirr(cashflows.values(), rate, rate);
        if let Err(e) = &mirr_result {
            debug!("{} MIRR not available: {}", label, e);
        }

        Self {
            npv: npv(cashflows, grid),
            irr: irr_result.into(),
            mirr: mirr_result.into(),
            discounted_payback: discounted_payback(cashflows, grid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_npv_matches_explicit_discounting() {
        let grid = TimeGrid::new(0.07, 3).unwrap();
        let flows = YearSeries::from_values(vec![-1000.0, 400.0, 400.0, 400.0]);
        let expected = -1000.0 + 400.0 / 1.07 + 400.0 / 1.07_f64.powi(2) + 400.0 / 1.07_f64.powi(3);
        assert_relative_eq!(npv(&flows, &grid), expected, max_relative = 1e-12);
        assert_relative_eq!(npv_at_rate(flows.values(), 0.07), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_npv_is_linear() {
        let grid = TimeGrid::new(0.045, 4).unwrap();
        let x = YearSeries::from_values(vec![-500.0, 120.0, 130.0, 140.0, 150.0]);
        let y = YearSeries::from_values(vec![80.0, -20.0, 35.0, 0.0, 60.0]);
        let (a, b) = (2.5, -0.75);

        let combined = x.scale(a).add(&y.scale(b));
        assert_relative_eq!(
            npv(&combined, &grid),
            a * npv(&x, &grid) + b * npv(&y, &grid),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_metrics_for_conventional_project() {
        let grid = TimeGrid::new(0.07, 5).unwrap();
        let flows = YearSeries::from_values(vec![-1000.0, 300.0, 300.0, 300.0, 300.0, 300.0]);
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let metrics = StakeholderMetrics::compute("test", &flows, &grid, start, &NewtonBisection::default());

        let irr = metrics.irr.value().unwrap();
        assert!(irr > 0.14 && irr < 0.16);
        let mirr = metrics.mirr.value().unwrap();
        assert!(mirr > 0.07 && mirr < irr);
        assert_eq!(metrics.discounted_payback, Payback::Year(4));
        assert!(metrics.npv > 0.0);
    }

    #[test]
    fn test_unavailable_metrics_carry_reason() {
        let grid = TimeGrid::new(0.07, 2).unwrap();
        let flows = YearSeries::from_values(vec![100.0, 50.0, 50.0]);
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let metrics = StakeholderMetrics::compute("test", &flows, &grid, start, &NewtonBisection::default());

        assert!(!metrics.irr.is_available());
        assert_eq!(metrics.irr.display_pct(), "n/a");
        match &metrics.mirr {
            MetricOutcome::NotAvailable { reason } => assert!(reason.contains("sign")),
            other => panic!("expected MIRR to be unavailable, got {:?}", other),
        }
        assert_eq!(metrics.discounted_payback, Payback::Immediate);
    }
}
