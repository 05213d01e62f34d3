//! Escalating electricity savings and the investor/customer split

use serde::{Deserialize, Serialize};

use super::series::YearSeries;

/// Gross savings and how they divide between the two stakeholders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsProjection {
    /// Gross savings, zero in year 0
    pub gross: YearSeries,
    /// EQORE's share (`gross * split`)
    pub eqore: YearSeries,
    /// Customer's share before tax (`gross * (1 - split)`)
    pub customer: YearSeries,
}

/// Projects savings from a year-1 base escalating at a constant rate
#[derive(Debug, Clone, Copy)]
pub struct SavingsProjector {
    /// Savings in year 1 (negative means a cost)
    pub base_savings: f64,
    /// Annual escalation, compounding from year 1
    pub escalation: f64,
    /// Fraction of savings routed to EQORE
    pub split: f64,
}

impl SavingsProjector {
    pub fn new(base_savings: f64, escalation: f64, split: f64) -> Self {
        Self {
            base_savings,
            escalation,
            split,
        }
    }

    /// Savings in `year`: `S1 * (1 + g)^(year - 1)` from year 1, nothing in year 0
    pub fn savings_in_year(&self, year: u32) -> f64 {
        if year == 0 {
            0.0
        } else {
            self.base_savings * (1.0 + self.escalation).powi(year as i32 - 1)
        }
    }

    pub fn project(&self, project_life: u32) -> SavingsProjection {
        let gross = YearSeries::from_fn(project_life, |year| self.savings_in_year(year));
        let eqore = gross.scale(self.split);
        let customer = gross.scale(1.0 - self.split);

        SavingsProjection {
            gross,
            eqore,
            customer,
        }
    }
}
