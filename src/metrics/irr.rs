//! Internal Rate of Return on dated cash flows
//!
//! Cash flows are placed on calendar dates and discounted with an
//! actual/365 exponent, so leap days shift the result slightly away from a
//! purely periodic IRR.

use chrono::NaiveDate;

use crate::error::MetricError;

/// Days per year in the discount exponent
const DAYS_PER_YEAR: f64 = 365.0;

/// Lowest rate the solver will evaluate; NPV is undefined at -100%
const RATE_FLOOR: f64 = -0.9999;

/// Highest rate considered when bracketing
const RATE_CEILING: f64 = 10.0;

/// Finds the rate that sets the NPV of dated cash flows to zero
///
/// Implementations must be bounded: a pathological series yields an error,
/// never an endless loop.
pub trait RootSolver {
    fn solve(&self, cashflows: &[f64], dates: &[NaiveDate]) -> Result<f64, MetricError>;
}

/// Newton-Raphson from an initial guess, falling back to bisection over
/// `[-99.99%, 1000%]` when Newton stalls or leaves the valid range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonBisection {
    pub initial_guess: f64,
    /// Converged once |NPV| falls below this
    pub tolerance: f64,
    pub max_newton_iterations: u32,
    pub max_bisection_iterations: u32,
}

impl Default for NewtonBisection {
    fn default() -> Self {
        Self {
            initial_guess: 0.10,
            tolerance: 1e-7,
            max_newton_iterations: 100,
            max_bisection_iterations: 200,
        }
    }
}

impl RootSolver for NewtonBisection {
    fn solve(&self, cashflows: &[f64], dates: &[NaiveDate]) -> Result<f64, MetricError> {
        let times = year_fractions(cashflows, dates)?;

        let has_positive = cashflows.iter().any(|&cf| cf > 0.0);
        let has_negative = cashflows.iter().any(|&cf| cf < 0.0);
        if !has_positive || !has_negative {
            return Err(MetricError::NoSignChange);
        }

        if let Some(rate) = self.newton(cashflows, &times) {
            return Ok(rate);
        }
        self.bisection(cashflows, &times)
    }
}

impl NewtonBisection {
    fn newton(&self, cashflows: &[f64], times: &[f64]) -> Option<f64> {
        let mut rate = self.initial_guess;

        for _ in 0..self.max_newton_iterations {
            let (npv, dnpv) = xnpv_and_derivative(cashflows, times, rate);
            if !npv.is_finite() || !dnpv.is_finite() {
                return None;
            }
            if npv.abs() < self.tolerance {
                return Some(rate);
            }
            if dnpv.abs() < 1e-20 {
                return None;
            }

            let next = (rate - npv / dnpv).max(RATE_FLOOR);
            if !next.is_finite() {
                return None;
            }
            rate = next;
        }

        None
    }

    fn bisection(&self, cashflows: &[f64], times: &[f64]) -> Result<f64, MetricError> {
        let mut low = RATE_FLOOR;
        let mut high = RATE_CEILING;
        let mut npv_low = xnpv(cashflows, times, low);
        let npv_high = xnpv(cashflows, times, high);

        if npv_low.abs() < self.tolerance {
            return Ok(low);
        }
        if npv_high.abs() < self.tolerance {
            return Ok(high);
        }
        if !(npv_low * npv_high < 0.0) {
            return Err(MetricError::InvalidBracket {
                low,
                high,
                npv_low,
                npv_high,
            });
        }

        let mut residual = npv_low;
        for _ in 0..self.max_bisection_iterations {
            let mid = 0.5 * (low + high);
            let npv_mid = xnpv(cashflows, times, mid);
            residual = npv_mid;

            if npv_mid.abs() < self.tolerance || 0.5 * (high - low) < 1e-12 {
                return Ok(mid);
            }

            if npv_low * npv_mid < 0.0 {
                high = mid;
            } else {
                low = mid;
                npv_low = npv_mid;
            }
        }

        Err(MetricError::ConvergenceFailed {
            iterations: self.max_newton_iterations + self.max_bisection_iterations,
            residual,
        })
    }
}

/// Years elapsed from the first date, actual/365
fn year_fractions(cashflows: &[f64], dates: &[NaiveDate]) -> Result<Vec<f64>, MetricError> {
    if cashflows.is_empty() {
        return Err(MetricError::EmptySeries);
    }
    if cashflows.len() != dates.len() {
        return Err(MetricError::DateMismatch {
            flows: cashflows.len(),
            dates: dates.len(),
        });
    }

    let start = dates[0];
    Ok(dates
        .iter()
        .map(|date| (*date - start).num_days() as f64 / DAYS_PER_YEAR)
        .collect())
}

/// NPV of dated cash flows at `rate`
pub fn xnpv(cashflows: &[f64], times: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .zip(times)
        .map(|(cf, t)| cf / (1.0 + rate).powf(*t))
        .sum()
}

/// NPV and its derivative with respect to rate
fn xnpv_and_derivative(cashflows: &[f64], times: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (cf, t) in cashflows.iter().zip(times) {
        let discount = (1.0 + rate).powf(*t);
        npv += cf / discount;
        dnpv -= t * cf / (discount * (1.0 + rate));
    }

    (npv, dnpv)
}
