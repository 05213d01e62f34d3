//! Bonus plus declining-balance tax depreciation and its tax shield

use log::debug;
use serde::{Deserialize, Serialize};

use super::series::YearSeries;

/// 5-year MACRS, half-year convention. Sums to 1.
pub const MACRS_5_YEAR: [f64; 6] = [0.20, 0.32, 0.192, 0.1152, 0.1152, 0.0576];

/// Depreciation deductions by project year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationSchedule {
    /// Bonus depreciation, expensed entirely in year 0
    pub bonus: YearSeries,
    /// Table-driven depreciation of the remaining basis, years 1..=table length
    pub declining_balance: YearSeries,
    /// `bonus + declining_balance`
    pub total: YearSeries,
    /// `total * tax_rate`
    pub tax_shield: YearSeries,
    /// Basis left undepreciated because the horizon is shorter than the table.
    /// It is not recaptured or written off.
    pub undepreciated_basis: f64,
}

impl DepreciationSchedule {
    /// Build the schedule for `investment`
    ///
    /// `rates[i]` applies to the post-bonus basis in project year `i + 1`;
    /// rates that would land beyond `project_life` are dropped.
    pub fn build(
        investment: f64,
        bonus_fraction: f64,
        rates: &[f64],
        project_life: u32,
        tax_rate: f64,
    ) -> Self {
        let mut bonus = YearSeries::zeros(project_life);
        bonus.set(0, bonus_fraction * investment);

        let remaining_basis = investment * (1.0 - bonus_fraction);
        let mut declining_balance = YearSeries::zeros(project_life);
        let mut undepreciated_basis = 0.0;

        for (i, rate) in rates.iter().enumerate() {
            let year = i as u32 + 1;
            let amount = rate * remaining_basis;
            if year <= project_life {
                declining_balance.set(year, amount);
            } else {
                undepreciated_basis += amount;
            }
        }

        if undepreciated_basis > 0.0 {
            debug!(
                "Horizon of {} years truncates depreciation table; {:.2} of basis left undepreciated",
                project_life, undepreciated_basis
            );
        }

        let total = bonus.add(&declining_balance);
        let tax_shield = total.scale(tax_rate);

        Self {
            bonus,
            declining_balance,
            total,
            tax_shield,
            undepreciated_basis,
        }
    }
}
