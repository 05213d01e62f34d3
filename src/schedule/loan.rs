//! Fixed-payment loan amortization

use serde::{Deserialize, Serialize};

use super::series::YearSeries;

/// Residual balance below which the final principal payment is clamped
pub const BALANCE_EPSILON: f64 = 1e-2;

/// One year of the amortization table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub year: u32,
    pub interest: f64,
    pub principal: f64,
    /// Balance remaining after this year's payment
    pub balance: f64,
}

/// Amortization schedule laid out on the project horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSchedule {
    /// Amount drawn at year 0
    pub principal_amount: f64,
    /// Level annual payment
    pub payment: f64,
    /// Years 1..=term
    pub entries: Vec<AmortizationEntry>,
    pub interest: YearSeries,
    pub principal: YearSeries,
    /// End-of-year balance; year 0 holds the amount drawn
    pub balance: YearSeries,
    /// `+principal_amount` at year 0, `-(interest + principal)` while the loan runs
    pub financing_cash_flow: YearSeries,
    /// `interest * tax_rate`
    pub interest_tax_shield: YearSeries,
}

impl LoanSchedule {
    pub fn total_interest(&self) -> f64 {
        self.interest.sum()
    }
}

/// Amortizes `principal` at `rate` over `term` years
#[derive(Debug, Clone, Copy)]
pub struct LoanAmortizer {
    pub principal: f64,
    pub rate: f64,
    pub term: u32,
}

impl LoanAmortizer {
    pub fn new(principal: f64, rate: f64, term: u32) -> Self {
        Self {
            principal,
            rate,
            term,
        }
    }

    fn has_loan(&self) -> bool {
        self.principal != 0.0 && self.term > 0
    }

    fn is_interest_free(&self) -> bool {
        self.rate == 0.0
    }

    /// Level annual payment: the annuity amount, or `principal / term` at zero interest
    pub fn payment(&self) -> f64 {
        if !self.has_loan() {
            return 0.0;
        }
        if self.is_interest_free() {
            return self.principal / self.term as f64;
        }
        let growth = (1.0 + self.rate).powi(self.term as i32);
        self.principal * self.rate * growth / (growth - 1.0)
    }

    /// Amortization table for years `1..=term`
    ///
    /// The last principal payment is clamped to the outstanding balance when
    /// it would overshoot or leave less than [`BALANCE_EPSILON`] behind, and
    /// interest is restated as the payment remainder, so the balance is exactly
    /// zero once the term ends.
    pub fn entries(&self) -> Vec<AmortizationEntry> {
        if !self.has_loan() {
            return Vec::new();
        }

        let payment = self.payment();
        let mut balance = self.principal;
        let mut entries = Vec::with_capacity(self.term as usize);

        for year in 1..=self.term {
            if balance <= 0.0 {
                entries.push(AmortizationEntry {
                    year,
                    interest: 0.0,
                    principal: 0.0,
                    balance: 0.0,
                });
                continue;
            }

            let (mut interest, mut principal) = if self.is_interest_free() {
                (0.0, payment)
            } else {
                let interest = balance * self.rate;
                (interest, payment - interest)
            };

            let residual = balance - principal;
            if residual < 0.0 || residual.abs() < BALANCE_EPSILON || year == self.term {
                principal = balance;
                interest = if self.is_interest_free() {
                    0.0
                } else {
                    payment - principal
                };
                balance = 0.0;
            } else {
                balance = residual;
            }

            entries.push(AmortizationEntry {
                year,
                interest,
                principal,
                balance,
            });
        }

        entries
    }

    /// Lay the amortization table out on a `project_life` horizon
    pub fn schedule(&self, project_life: u32, tax_rate: f64) -> LoanSchedule {
        let entries: Vec<AmortizationEntry> = self
            .entries()
            .into_iter()
            .filter(|entry| entry.year <= project_life)
            .collect();
        let drawn = if self.has_loan() { self.principal } else { 0.0 };

        let mut interest = YearSeries::zeros(project_life);
        let mut principal = YearSeries::zeros(project_life);
        let mut balance = YearSeries::zeros(project_life);
        let mut financing_cash_flow = YearSeries::zeros(project_life);

        balance.set(0, drawn);
        financing_cash_flow.set(0, drawn);
        for entry in &entries {
            interest.set(entry.year, entry.interest);
            principal.set(entry.year, entry.principal);
            balance.set(entry.year, entry.balance);
            financing_cash_flow.set(entry.year, -(entry.interest + entry.principal));
        }

        let interest_tax_shield = interest.scale(tax_rate);

        LoanSchedule {
            principal_amount: drawn,
            payment: self.payment(),
            entries,
            interest,
            principal,
            balance,
            financing_cash_flow,
            interest_tax_shield,
        }
    }
}
