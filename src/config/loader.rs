//! Scenario documents: an optional preset plus field overrides
//!
//! The same JSON shape is read from scenario files and from HTTP request
//! bodies:
//!
//! ```json
//! { "preset": "Thermofusion", "discount_rate": 0.06, "loan_term": 5 }
//! ```
//!
//! Unknown keys are rejected so that a misspelt field fails loudly instead of
//! silently falling back to the base value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::{Preset, ScenarioConfig};
use crate::error::LoadError;

/// Individually optional scenario fields, applied over a base configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioOverrides {
    pub investment: Option<f64>,
    pub discount_rate: Option<f64>,
    pub project_life: Option<u32>,
    pub base_savings: Option<f64>,
    pub escalation: Option<f64>,
    pub savings_split: Option<f64>,
    pub corp_tax: Option<f64>,
    pub ira_credit_pct: Option<f64>,
    pub bonus_depr_pct: Option<f64>,
    pub finance_pct: Option<f64>,
    pub loan_rate: Option<f64>,
    pub loan_term: Option<u32>,
    pub depreciation_rates: Option<Vec<f64>>,
    pub evaluation_date: Option<NaiveDate>,
}

impl ScenarioOverrides {
    /// Overlay every field that is set onto `base`
    pub fn apply(self, base: ScenarioConfig) -> ScenarioConfig {
        ScenarioConfig {
            investment: self.investment.unwrap_or(base.investment),
            discount_rate: self.discount_rate.unwrap_or(base.discount_rate),
            project_life: self.project_life.unwrap_or(base.project_life),
            base_savings: self.base_savings.unwrap_or(base.base_savings),
            escalation: self.escalation.unwrap_or(base.escalation),
            savings_split: self.savings_split.unwrap_or(base.savings_split),
            corp_tax: self.corp_tax.unwrap_or(base.corp_tax),
            ira_credit_pct: self.ira_credit_pct.unwrap_or(base.ira_credit_pct),
            bonus_depr_pct: self.bonus_depr_pct.unwrap_or(base.bonus_depr_pct),
            finance_pct: self.finance_pct.unwrap_or(base.finance_pct),
            loan_rate: self.loan_rate.unwrap_or(base.loan_rate),
            loan_term: self.loan_term.unwrap_or(base.loan_term),
            depreciation_rates: self.depreciation_rates.unwrap_or(base.depreciation_rates),
            evaluation_date: self.evaluation_date.or(base.evaluation_date),
        }
    }
}

/// A scenario as submitted: base preset (or defaults) plus overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScenarioRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,
    #[serde(flatten)]
    pub overrides: ScenarioOverrides,
}

impl ScenarioRequest {
    /// Resolve to a validated configuration
    pub fn resolve(self) -> Result<ScenarioConfig, LoadError> {
        let base = self.preset.map(|p| p.config()).unwrap_or_default();
        let config = self.overrides.apply(base);
        config.validate()?;
        Ok(config)
    }

    /// Parse a scenario document, rejecting keys that name no input
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let mut document: Map<String, Value> = serde_json::from_str(json)?;
        let preset = match document.remove("preset") {
            None | Some(Value::Null) => None,
            Some(value) => Some(serde_json::from_value(value)?),
        };
        let overrides = serde_json::from_value(Value::Object(document))?;
        Ok(Self { preset, overrides })
    }
}

/// Read and resolve a JSON scenario file
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig, LoadError> {
    let contents = fs::read_to_string(path)?;
    ScenarioRequest::from_json(&contents)?.resolve()
}
