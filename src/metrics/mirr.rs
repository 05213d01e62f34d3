//! Modified Internal Rate of Return

use crate::error::MetricError;

use super::npv_at_rate;

/// MIRR of periodic cash flows
///
/// Outflows are discounted to year 0 at `finance_rate`, inflows compounded to
/// the final year at `reinvest_rate`; the result is the rate linking the two.
pub fn mirr(cashflows: &[f64], finance_rate: f64, reinvest_rate: f64) -> Result<f64, MetricError> {
    if cashflows.is_empty() {
        return Err(MetricError::EmptySeries);
    }

    let inflows: Vec<f64> = cashflows.iter().map(|&cf| cf.max(0.0)).collect();
    let outflows: Vec<f64> = cashflows.iter().map(|&cf| cf.min(0.0)).collect();
    if !inflows.iter().any(|&cf| cf > 0.0) || !outflows.iter().any(|&cf| cf < 0.0) {
        return Err(MetricError::NoSignChange);
    }

    // Both signs present, so there are at least two flows
    let periods = (cashflows.len() - 1) as i32;
    let pv_inflows = npv_at_rate(&inflows, reinvest_rate).abs();
    let pv_outflows = npv_at_rate(&outflows, finance_rate).abs();
    let fv_inflows = pv_inflows * (1.0 + reinvest_rate).powi(periods);

    Ok((fv_inflows / pv_outflows).powf(1.0 / periods as f64) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mirr_reference_value() {
        // Investment of 1000 then 300/400/500 at 10% finance and 12% reinvestment
        let flows = [-1000.0, 300.0, 400.0, 500.0];
        let fv = 300.0 * 1.12_f64.powi(2) + 400.0 * 1.12 + 500.0;
        let expected = (fv / 1000.0).powf(1.0 / 3.0) - 1.0;

        assert_abs_diff_eq!(mirr(&flows, 0.10, 0.12).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_discounted_outflows() {
        // Second outflow is financed at 5%
        let flows = [-100.0, -105.0, 300.0];
        let expected = (300.0_f64 / 200.0).powf(0.5) - 1.0;
        assert_abs_diff_eq!(mirr(&flows, 0.05, 0.05).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_requires_both_signs() {
        assert_eq!(mirr(&[10.0, 20.0], 0.07, 0.07), Err(MetricError::NoSignChange));
        assert_eq!(mirr(&[-10.0, -20.0], 0.07, 0.07), Err(MetricError::NoSignChange));
        assert_eq!(mirr(&[], 0.07, 0.07), Err(MetricError::EmptySeries));
    }
}
