//! Year index and discount factors for a scenario horizon

use chrono::{Months, NaiveDate};

use super::series::YearSeries;
use crate::error::{ConfigError, MetricError};

/// Longest horizon accepted, in years
pub const MAX_PROJECT_LIFE: u32 = 100;

/// Years `0..=project_life` with their discount factors `1 / (1 + r)^t`
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    discount_rate: f64,
    project_life: u32,
    discount_factors: YearSeries,
}

impl TimeGrid {
    /// Build the grid, rejecting rates at or below -100% and horizons outside
    /// `1..=MAX_PROJECT_LIFE`
    ///
    /// Zero and negative rates are ordinary inputs; a negative rate simply
    /// yields factors above one.
    pub fn new(discount_rate: f64, project_life: u32) -> Result<Self, ConfigError> {
        if !discount_rate.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "discount_rate",
                value: discount_rate,
            });
        }
        if discount_rate <= -1.0 {
            return Err(ConfigError::InvalidDiscountRate(discount_rate));
        }
        if project_life == 0 {
            return Err(ConfigError::ZeroProjectLife);
        }
        if project_life > MAX_PROJECT_LIFE {
            return Err(ConfigError::ProjectLifeTooLong(project_life));
        }

        let discount_factors =
            YearSeries::from_fn(project_life, |t| 1.0 / (1.0 + discount_rate).powi(t as i32));

        Ok(Self {
            discount_rate,
            project_life,
            discount_factors,
        })
    }

    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    pub fn project_life(&self) -> u32 {
        self.project_life
    }

    pub fn years(&self) -> impl Iterator<Item = u32> {
        0..=self.project_life
    }

    pub fn discount_factor(&self, year: u32) -> f64 {
        self.discount_factors.get(year)
    }

    pub fn discount_factors(&self) -> &YearSeries {
        &self.discount_factors
    }

    /// Present value of a series on this grid
    pub fn present_value(&self, series: &YearSeries) -> f64 {
        series.dot(&self.discount_factors)
    }

    /// Calendar date of each year: year 0 on `start`, year t on its t-th anniversary
    ///
    /// A 29 February start falls back to 28 February in common years.
    pub fn calendar_dates(&self, start: NaiveDate) -> Result<Vec<NaiveDate>, MetricError> {
        self.years()
            .map(|year| {
                start
                    .checked_add_months(Months::new(12 * year))
                    .ok_or(MetricError::DateOutOfRange(year))
            })
            .collect()
    }
}
