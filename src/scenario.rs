//! Scenario runner for single and batch evaluations
//!
//! Each evaluation is independent and shares no state, so batches run in
//! parallel.

use rayon::prelude::*;

use crate::config::{Preset, ScenarioConfig};
use crate::error::ConfigError;
use crate::metrics::{NewtonBisection, RootSolver};
use crate::projection::{CashFlowResult, ProjectionEngine};

/// Evaluates scenarios with a shared IRR solver configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let result = runner.run(&Preset::Thermofusion.config())?;
/// println!("{}", result.summary.project_npv);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner<S = NewtonBisection> {
    solver: S,
}

impl ScenarioRunner<NewtonBisection> {
    pub fn new() -> Self {
        Self {
            solver: NewtonBisection::default(),
        }
    }
}

impl Default for ScenarioRunner<NewtonBisection> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RootSolver + Clone + Send + Sync> ScenarioRunner<S> {
    pub fn with_solver(solver: S) -> Self {
        Self { solver }
    }

    /// Evaluate a single scenario
    pub fn run(&self, config: &ScenarioConfig) -> Result<CashFlowResult, ConfigError> {
        let engine = ProjectionEngine::with_solver(config.clone(), self.solver.clone())?;
        Ok(engine.evaluate())
    }

    /// Evaluate independent scenarios in parallel, preserving input order
    pub fn run_batch(&self, configs: &[ScenarioConfig]) -> Vec<Result<CashFlowResult, ConfigError>> {
        configs.par_iter().map(|config| self.run(config)).collect()
    }

    /// Evaluate every named preset
    pub fn run_presets(&self) -> Vec<(Preset, Result<CashFlowResult, ConfigError>)> {
        let configs: Vec<ScenarioConfig> = Preset::ALL.iter().map(|p| p.config()).collect();
        Preset::ALL.into_iter().zip(self.run_batch(&configs)).collect()
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_batch_preserves_order_and_errors() {
        let runner = ScenarioRunner::new();
        let good = ScenarioConfig {
            evaluation_date: NaiveDate::from_ymd_opt(2025, 6, 30),
            ..Default::default()
        };
        let bad = ScenarioConfig {
            project_life: 3,
            ..Default::default()
        };

        let results = runner.run_batch(&[good.clone(), bad, good]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(ConfigError::LoanTermExceedsProjectLife { .. })
        ));
        assert_eq!(results[0].as_ref().unwrap(), results[2].as_ref().unwrap());
    }

    #[test]
    fn test_higher_discount_rate_lowers_savings_npv() {
        let runner = ScenarioRunner::new();
        let configs: Vec<_> = [0.03, 0.07, 0.12]
            .iter()
            .map(|&rate| ScenarioConfig {
                discount_rate: rate,
                evaluation_date: NaiveDate::from_ymd_opt(2025, 1, 1),
                ..Preset::Thermofusion.config()
            })
            .collect();

        let npvs: Vec<f64> = runner
            .run_batch(&configs)
            .into_iter()
            .map(|r| r.unwrap().summary.npv_savings)
            .collect();
        assert!(npvs[0] > npvs[1] && npvs[1] > npvs[2]);
    }

    #[test]
    fn test_run_presets() {
        let results = ScenarioRunner::new().run_presets();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|(_, r)| r.is_ok()));
    }
}
