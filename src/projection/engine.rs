//! Scenario evaluation: builds every schedule, assembles cash flows and
//! computes return metrics

use log::{debug, info};

use crate::config::ScenarioConfig;
use crate::error::ConfigError;
use crate::metrics::{NewtonBisection, RootSolver, StakeholderMetrics};
use crate::schedule::{DepreciationSchedule, LoanAmortizer, SavingsProjector, TimeGrid};

use super::assembler::CashFlowAssembler;
use super::cashflows::{CashFlowResult, ResultSummary};

/// Evaluates one validated scenario
pub struct ProjectionEngine<S = NewtonBisection> {
    config: ScenarioConfig,
    grid: TimeGrid,
    solver: S,
}

impl ProjectionEngine<NewtonBisection> {
    /// Validate `config` and prepare an engine with the default IRR solver
    pub fn new(config: ScenarioConfig) -> Result<Self, ConfigError> {
        Self::with_solver(config, NewtonBisection::default())
    }
}

impl<S: RootSolver> ProjectionEngine<S> {
    pub fn with_solver(config: ScenarioConfig, solver: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = TimeGrid::new(config.discount_rate, config.project_life)?;
        Ok(Self {
            config,
            grid,
            solver,
        })
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn evaluate(&self) -> CashFlowResult {
        let config = &self.config;
        let life = config.project_life;

        let savings = SavingsProjector::new(config.base_savings, config.escalation, config.savings_split)
            .project(life);
        debug!("Savings projected: year 1 {:.2}, total {:.2}", savings.gross.get(1), savings.gross.sum());

        let depreciation = DepreciationSchedule::build(
            config.investment,
            config.bonus_depr_pct,
            &config.depreciation_rates,
            life,
            config.corp_tax,
        );
        debug!(
            "Depreciation built: {:.2} deducted, shield {:.2}",
            depreciation.total.sum(),
            depreciation.tax_shield.sum()
        );

        let loan = LoanAmortizer::new(config.loan_principal(), config.loan_rate, config.loan_term)
            .schedule(life, config.corp_tax);
        debug!(
            "Loan amortized: principal {:.2}, payment {:.2}, interest {:.2}",
            loan.principal_amount,
            loan.payment,
            loan.total_interest()
        );

        let cash_flows = CashFlowAssembler {
            config,
            savings: &savings,
            depreciation: &depreciation,
            loan: &loan,
        }
        .assemble();

        let start = config.evaluation_date_or_today();
        let eqore = StakeholderMetrics::compute("EQORE", &cash_flows.eqore, &self.grid, start, &self.solver);
        let customer =
            StakeholderMetrics::compute("Customer", &cash_flows.customer, &self.grid, start, &self.solver);
        let project = StakeholderMetrics::compute("Project", &cash_flows.total, &self.grid, start, &self.solver);

        let summary = ResultSummary {
            npv_savings: self.grid.present_value(&savings.gross),
            npv_depreciation_shield: self.grid.present_value(&depreciation.tax_shield),
            npv_interest_shield: self.grid.present_value(&loan.interest_tax_shield),
            ira_credit: config.ira_credit(),
            loan_principal: loan.principal_amount,
            down_payment: config.investment - loan.principal_amount,
            loan_payment: loan.payment,
            total_interest: loan.total_interest(),
            eqore_npv: eqore.npv,
            customer_npv: customer.npv,
            project_npv: project.npv,
        };

        info!(
            "Evaluated {}-year scenario: project NPV {:.2}, IRR {}, payback {}",
            life,
            summary.project_npv,
            project.irr.display_pct(),
            project.discounted_payback
        );

        CashFlowResult {
            config: ScenarioConfig {
                evaluation_date: Some(start),
                ..config.clone()
            },
            discount_factors: self.grid.discount_factors().clone(),
            savings,
            depreciation,
            loan,
            cash_flows,
            eqore,
            customer,
            project,
            summary,
        }
    }
}

/// Validate and evaluate `config` with the default solver
pub fn evaluate(config: &ScenarioConfig) -> Result<CashFlowResult, ConfigError> {
    Ok(ProjectionEngine::new(config.clone())?.evaluate())
}
