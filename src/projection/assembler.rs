//! Combines savings, depreciation and financing into stakeholder cash flows

use serde::{Deserialize, Serialize};

use crate::config::ScenarioConfig;
use crate::schedule::{DepreciationSchedule, LoanSchedule, SavingsProjection, YearSeries};

/// Cash flow series for each party and the whole project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeholderCashFlows {
    pub eqore: YearSeries,
    pub customer: YearSeries,
    /// `eqore + customer` in every year
    pub total: YearSeries,
}

/// Applies the levered equity convention to the upstream schedules
///
/// Performs no validation: all series are expected to share one horizon.
pub struct CashFlowAssembler<'a> {
    pub config: &'a ScenarioConfig,
    pub savings: &'a SavingsProjection,
    pub depreciation: &'a DepreciationSchedule,
    pub loan: &'a LoanSchedule,
}

impl<'a> CashFlowAssembler<'a> {
    pub fn assemble(&self) -> StakeholderCashFlows {
        let eqore = self.eqore_cash_flow();
        let customer = self.customer_cash_flow();
        let total = eqore.add(&customer);

        StakeholderCashFlows {
            eqore,
            customer,
            total,
        }
    }

    /// EQORE receives its savings share as cash.
    ///
    /// Investor-side costs or taxes would be netted here; none are modelled.
    fn eqore_cash_flow(&self) -> YearSeries {
        self.savings.eqore.clone()
    }

    /// Levered free cash flow to the customer's equity
    ///
    /// Year 0: `-investment + credit + loan drawn + depreciation shield`.
    /// Later years: savings net of interest are taxed, the depreciation shield
    /// is added back and principal repaid is a cash outflow.
    fn customer_cash_flow(&self) -> YearSeries {
        let tax = self.config.corp_tax;
        let shield = &self.depreciation.tax_shield;
        let loan = self.loan;

        YearSeries::from_fn(self.savings.customer.project_life(), |year| {
            if year == 0 {
                -self.config.investment
                    + self.config.ira_credit()
                    + loan.principal_amount
                    + shield[0]
            } else {
                (self.savings.customer[year] - loan.interest[year]) * (1.0 - tax) + shield[year]
                    - loan.principal[year]
            }
        })
    }
}
