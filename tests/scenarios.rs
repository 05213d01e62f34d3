//! End-to-end checks of evaluated scenarios against hand-computed figures

use approx::assert_abs_diff_eq;
use battery_npv::metrics::npv;
use battery_npv::schedule::TimeGrid;
use battery_npv::{evaluate, CashFlowResult, Payback, Preset, ScenarioConfig, YearSeries};
use chrono::NaiveDate;

fn dated(config: ScenarioConfig) -> ScenarioConfig {
    ScenarioConfig {
        evaluation_date: NaiveDate::from_ymd_opt(2025, 1, 1),
        ..config
    }
}

fn scenario_a() -> ScenarioConfig {
    dated(ScenarioConfig {
        investment: 186_900.0,
        discount_rate: 0.045,
        project_life: 15,
        base_savings: 94_000.0,
        escalation: 0.03,
        savings_split: 0.50,
        corp_tax: 0.28,
        ira_credit_pct: 0.30,
        bonus_depr_pct: 0.40,
        finance_pct: 0.80,
        loan_rate: 0.09,
        loan_term: 3,
        ..Default::default()
    })
}

fn all_series(result: &CashFlowResult) -> Vec<&YearSeries> {
    vec![
        &result.discount_factors,
        &result.savings.gross,
        &result.savings.eqore,
        &result.savings.customer,
        &result.depreciation.bonus,
        &result.depreciation.declining_balance,
        &result.depreciation.total,
        &result.depreciation.tax_shield,
        &result.loan.interest,
        &result.loan.principal,
        &result.loan.balance,
        &result.loan.financing_cash_flow,
        &result.loan.interest_tax_shield,
        &result.cash_flows.eqore,
        &result.cash_flows.customer,
        &result.cash_flows.total,
    ]
}

fn sample_configs() -> Vec<ScenarioConfig> {
    vec![
        dated(ScenarioConfig::default()),
        scenario_a(),
        dated(Preset::Aalberts.config()),
        dated(ScenarioConfig {
            project_life: 3,
            loan_term: 3,
            bonus_depr_pct: 0.0,
            ..Default::default()
        }),
        dated(ScenarioConfig {
            project_life: 1,
            loan_term: 1,
            discount_rate: -0.01,
            escalation: -0.05,
            ..Default::default()
        }),
    ]
}

#[test]
fn scenario_a_year_zero_to_the_cent() {
    let result = evaluate(&scenario_a()).unwrap();
    let shield_0 = 0.40 * 186_900.0 * 0.28;

    assert_abs_diff_eq!(result.summary.loan_principal, 149_520.00, epsilon = 0.005);
    assert_abs_diff_eq!(result.summary.down_payment, 37_380.00, epsilon = 0.005);
    assert_abs_diff_eq!(result.depreciation.tax_shield[0], shield_0, epsilon = 0.005);
    assert_abs_diff_eq!(
        result.cash_flows.customer[0],
        -186_900.0 + 0.30 * 186_900.0 + 149_520.0 + shield_0,
        epsilon = 0.005
    );
    assert_abs_diff_eq!(result.cash_flows.customer[0], 39_622.80, epsilon = 0.005);
}

#[test]
fn scenario_a_later_years_follow_levered_formula() {
    let result = evaluate(&scenario_a()).unwrap();
    for year in 1..=15 {
        let expected = (result.savings.customer[year] - result.loan.interest[year]) * (1.0 - 0.28)
            + result.depreciation.tax_shield[year]
            - result.loan.principal[year];
        assert_abs_diff_eq!(result.cash_flows.customer[year], expected, epsilon = 1e-9);
    }
    assert_eq!(result.loan.principal[4], 0.0);
}

#[test]
fn scenario_b_zero_interest_loan() {
    let config = dated(ScenarioConfig {
        investment: 100_000.0,
        finance_pct: 0.50,
        loan_rate: 0.0,
        loan_term: 4,
        ..Default::default()
    });
    let result = evaluate(&config).unwrap();

    for year in 1..=4 {
        assert_eq!(result.loan.principal[year], 12_500.0);
    }
    assert!(result.loan.interest.values().iter().all(|&i| i == 0.0));
    assert_eq!(result.loan.balance[4], 0.0);
    assert_eq!(result.loan.principal[5], 0.0);
}

#[test]
fn full_bonus_zeroes_declining_balance_years() {
    let result = evaluate(&dated(ScenarioConfig::default())).unwrap();
    for year in 1..=6 {
        assert_eq!(result.depreciation.declining_balance[year], 0.0);
    }
    assert_eq!(result.depreciation.total[0], 188_571.50);
}

#[test]
fn every_series_spans_the_horizon() {
    for config in sample_configs() {
        let result = evaluate(&config).unwrap();
        let expected = config.project_life as usize + 1;
        for series in all_series(&result) {
            assert_eq!(series.len(), expected);
        }
        assert_eq!(result.rows().len(), expected);
        assert_eq!(result.savings.gross[0], 0.0);
    }
}

#[test]
fn depreciation_never_exceeds_investment() {
    for config in sample_configs() {
        let result = evaluate(&config).unwrap();
        assert!(result.depreciation.total.sum() <= config.investment + 1e-6);
    }
}

#[test]
fn loan_is_fully_retired_at_term() {
    for config in sample_configs() {
        let result = evaluate(&config).unwrap();
        let term = config.loan_term;
        assert_abs_diff_eq!(
            result.loan.principal.sum(),
            config.loan_principal(),
            epsilon = 1e-2
        );
        assert_eq!(result.loan.balance[term], 0.0);
    }
}

#[test]
fn stakeholder_flows_add_up_exactly() {
    for config in sample_configs() {
        let result = evaluate(&config).unwrap();
        let flows = &result.cash_flows;
        for year in 0..=config.project_life {
            assert_eq!(flows.eqore[year] + flows.customer[year], flows.total[year]);
        }
    }
}

#[test]
fn zero_rates_reduce_customer_flow_to_closed_form() {
    let config = dated(ScenarioConfig {
        discount_rate: 0.0,
        escalation: 0.0,
        loan_rate: 0.0,
        savings_split: 0.0,
        bonus_depr_pct: 0.25,
        ..Default::default()
    });
    let result = evaluate(&config).unwrap();
    let tax = config.corp_tax;

    for year in 1..=config.project_life {
        assert_eq!(
            result.cash_flows.customer[year],
            config.base_savings * (1.0 - tax) + result.depreciation.tax_shield[year]
                - result.loan.principal[year]
        );
    }
}

#[test]
fn npv_is_linear_over_result_series() {
    let result = evaluate(&scenario_a()).unwrap();
    let grid = TimeGrid::new(0.045, 15).unwrap();
    let x = &result.cash_flows.customer;
    let y = &result.savings.gross;
    let (a, b) = (1.7, -0.4);

    let combined = x.scale(a).add(&y.scale(b));
    assert_abs_diff_eq!(
        npv(&combined, &grid),
        a * npv(x, &grid) + b * npv(y, &grid),
        epsilon = 1e-6
    );
}

#[test]
fn payback_is_non_decreasing_in_discount_rate() {
    let year_key = |payback: Payback| payback.year().unwrap_or(u32::MAX);
    let mut previous = 0;

    for rate in [0.0, 0.02, 0.045, 0.08, 0.12, 0.20] {
        let config = dated(ScenarioConfig {
            discount_rate: rate,
            ira_credit_pct: 0.0,
            finance_pct: 0.0,
            loan_term: 0,
            bonus_depr_pct: 0.0,
            ..Default::default()
        });
        let result = evaluate(&config).unwrap();
        let key = year_key(result.project.discounted_payback);
        assert!(key >= previous, "payback moved earlier at rate {}", rate);
        previous = key;
    }
}

#[test]
fn project_irr_zeroes_dated_npv() {
    let config = dated(ScenarioConfig {
        ira_credit_pct: 0.0,
        finance_pct: 0.0,
        loan_term: 0,
        ..Default::default()
    });
    let result = evaluate(&config).unwrap();
    let irr = result.project.irr.value().expect("conventional project has an IRR");

    let grid = TimeGrid::new(config.discount_rate, config.project_life).unwrap();
    let dates = grid.calendar_dates(config.evaluation_date.unwrap()).unwrap();
    let times: Vec<f64> = dates
        .iter()
        .map(|d| (*d - dates[0]).num_days() as f64 / 365.0)
        .collect();
    let residual = battery_npv::metrics::xnpv(result.cash_flows.total.values(), &times, irr);
    assert_abs_diff_eq!(residual, 0.0, epsilon = 1e-4);
    assert!(result.project.mirr.is_available());
}

#[test]
fn rejects_invalid_configuration() {
    let config = ScenarioConfig {
        loan_term: 25,
        ..Default::default()
    };
    assert!(evaluate(&config).is_err());
}
