//! Evaluation output structures

use serde::{Deserialize, Serialize};

use crate::config::ScenarioConfig;
use crate::metrics::StakeholderMetrics;
use crate::schedule::{DepreciationSchedule, LoanSchedule, SavingsProjection, YearSeries};

use super::assembler::StakeholderCashFlows;

/// One year of the cash flow table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowRow {
    pub year: u32,
    pub discount_factor: f64,

    // Savings
    pub gross_savings: f64,
    pub eqore_savings: f64,
    pub customer_savings: f64,

    // Depreciation
    pub depreciation: f64,
    pub depreciation_tax_shield: f64,

    // Financing
    pub interest_paid: f64,
    pub principal_paid: f64,
    pub loan_balance: f64,
    pub interest_tax_shield: f64,
    pub financing_cash_flow: f64,

    // Cash flows
    pub eqore_cash_flow: f64,
    pub customer_cash_flow: f64,
    pub total_cash_flow: f64,
}

/// Headline figures of an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub npv_savings: f64,
    pub npv_depreciation_shield: f64,
    pub npv_interest_shield: f64,
    pub ira_credit: f64,
    pub loan_principal: f64,
    pub down_payment: f64,
    pub loan_payment: f64,
    pub total_interest: f64,
    pub eqore_npv: f64,
    pub customer_npv: f64,
    pub project_npv: f64,
}

/// Complete, immutable outcome of evaluating one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowResult {
    /// Inputs as evaluated; `evaluation_date` is always set to the date the
    /// IRR calendar started from, so feeding it back reproduces the result
    pub config: ScenarioConfig,
    pub discount_factors: YearSeries,
    pub savings: SavingsProjection,
    pub depreciation: DepreciationSchedule,
    pub loan: LoanSchedule,
    pub cash_flows: StakeholderCashFlows,
    pub eqore: StakeholderMetrics,
    pub customer: StakeholderMetrics,
    /// Whole-project metrics; the headline IRR, MIRR and payback
    pub project: StakeholderMetrics,
    pub summary: ResultSummary,
}

impl CashFlowResult {
    pub fn project_life(&self) -> u32 {
        self.config.project_life
    }

    /// Year-by-year table, one row per year `0..=project_life`
    pub fn rows(&self) -> Vec<CashflowRow> {
        (0..=self.project_life())
            .map(|year| CashflowRow {
                year,
                discount_factor: self.discount_factors[year],
                gross_savings: self.savings.gross[year],
                eqore_savings: self.savings.eqore[year],
                customer_savings: self.savings.customer[year],
                depreciation: self.depreciation.total[year],
                depreciation_tax_shield: self.depreciation.tax_shield[year],
                interest_paid: self.loan.interest[year],
                principal_paid: self.loan.principal[year],
                loan_balance: self.loan.balance[year],
                interest_tax_shield: self.loan.interest_tax_shield[year],
                financing_cash_flow: self.loan.financing_cash_flow[year],
                eqore_cash_flow: self.cash_flows.eqore[year],
                customer_cash_flow: self.cash_flows.customer[year],
                total_cash_flow: self.cash_flows.total[year],
            })
            .collect()
    }
}
