//! Scenario inputs: the immutable configuration of one evaluation
//!
//! Rates and shares are fractions (0.07 for 7%). A configuration is checked
//! with [`ScenarioConfig::validate`] before any series is built.

mod presets;
pub mod loader;

pub use presets::Preset;
pub use loader::{ScenarioOverrides, ScenarioRequest, load_scenario};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::schedule::{MACRS_5_YEAR, MAX_PROJECT_LIFE};

/// Tolerance on the depreciation table summing to one
const TABLE_SUM_TOLERANCE: f64 = 1e-9;

/// Inputs for a single scenario evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Upfront investment ($)
    pub investment: f64,
    /// Discount rate used for NPV, payback and MIRR
    pub discount_rate: f64,
    /// Project life in years
    pub project_life: u32,
    /// Year-1 electricity savings ($)
    pub base_savings: f64,
    /// Annual savings escalation
    pub escalation: f64,
    /// EQORE's share of gross savings
    pub savings_split: f64,
    /// Corporate tax rate applied to the customer
    pub corp_tax: f64,
    /// Investment tax credit as a share of the investment
    pub ira_credit_pct: f64,
    /// Share of the investment expensed as bonus depreciation in year 0
    pub bonus_depr_pct: f64,
    /// Share of the investment financed by the loan
    pub finance_pct: f64,
    /// Loan interest rate
    pub loan_rate: f64,
    /// Loan term in years
    pub loan_term: u32,
    /// Declining-balance table applied to the post-bonus basis
    pub depreciation_rates: Vec<f64>,
    /// Date of year 0 for IRR; today when absent
    pub evaluation_date: Option<NaiveDate>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            investment: 188_571.50,
            discount_rate: 0.07,
            project_life: 20,
            base_savings: 28_000.00,
            escalation: 0.059,
            savings_split: 0.50,
            corp_tax: 0.21,
            ira_credit_pct: 0.30,
            bonus_depr_pct: 1.00,
            finance_pct: 0.80,
            loan_rate: 0.05,
            loan_term: 5,
            depreciation_rates: MACRS_5_YEAR.to_vec(),
            evaluation_date: None,
        }
    }
}

impl ScenarioConfig {
    /// Loan principal drawn at year 0
    pub fn loan_principal(&self) -> f64 {
        self.finance_pct * self.investment
    }

    /// Equity paid by the customer at year 0
    pub fn down_payment(&self) -> f64 {
        self.investment - self.loan_principal()
    }

    /// Investment tax credit received at year 0
    pub fn ira_credit(&self) -> f64 {
        self.ira_credit_pct * self.investment
    }

    /// Evaluation date, falling back to today's local date
    pub fn evaluation_date_or_today(&self) -> NaiveDate {
        self.evaluation_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Reject inputs that would yield undefined or meaningless series
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_fields = [
            ("investment", self.investment),
            ("discount_rate", self.discount_rate),
            ("base_savings", self.base_savings),
            ("escalation", self.escalation),
            ("savings_split", self.savings_split),
            ("corp_tax", self.corp_tax),
            ("ira_credit_pct", self.ira_credit_pct),
            ("bonus_depr_pct", self.bonus_depr_pct),
            ("finance_pct", self.finance_pct),
            ("loan_rate", self.loan_rate),
        ];
        for (field, value) in finite_fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        if self.investment <= 0.0 {
            return Err(ConfigError::NonPositiveInvestment(self.investment));
        }
        if self.discount_rate <= -1.0 {
            return Err(ConfigError::InvalidDiscountRate(self.discount_rate));
        }
        if self.loan_rate <= -1.0 {
            return Err(ConfigError::InvalidLoanRate(self.loan_rate));
        }
        if self.project_life == 0 {
            return Err(ConfigError::ZeroProjectLife);
        }
        if self.project_life > MAX_PROJECT_LIFE {
            return Err(ConfigError::ProjectLifeTooLong(self.project_life));
        }

        let fractions = [
            ("savings_split", self.savings_split),
            ("bonus_depr_pct", self.bonus_depr_pct),
            ("finance_pct", self.finance_pct),
        ];
        for (field, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::FractionOutOfRange { field, value });
            }
        }

        if self.loan_term == 0 && self.finance_pct > 0.0 {
            return Err(ConfigError::ZeroLoanTerm);
        }
        if self.loan_term > self.project_life {
            return Err(ConfigError::LoanTermExceedsProjectLife {
                loan_term: self.loan_term,
                project_life: self.project_life,
            });
        }

        self.validate_depreciation_rates()
    }

    fn validate_depreciation_rates(&self) -> Result<(), ConfigError> {
        let rates = &self.depreciation_rates;
        if rates.is_empty() {
            return Err(ConfigError::InvalidDepreciationTable(
                "table has no rates".to_string(),
            ));
        }
        if let Some(bad) = rates.iter().find(|r| !r.is_finite() || **r < 0.0) {
            return Err(ConfigError::InvalidDepreciationTable(format!(
                "rate {} is not a finite non-negative number",
                bad
            )));
        }
        let total: f64 = rates.iter().sum();
        if (total - 1.0).abs() > TABLE_SUM_TOLERANCE {
            return Err(ConfigError::InvalidDepreciationTable(format!(
                "rates sum to {}, expected 1",
                total
            )));
        }
        Ok(())
    }
}
