//! Year-indexed building blocks of a scenario: time grid, savings,
//! depreciation and loan amortization

mod series;
mod time_grid;
mod savings;
mod depreciation;
mod loan;

pub use series::YearSeries;
pub use time_grid::{TimeGrid, MAX_PROJECT_LIFE};
pub use savings::{SavingsProjector, SavingsProjection};
pub use depreciation::{DepreciationSchedule, MACRS_5_YEAR};
pub use loan::{LoanAmortizer, LoanSchedule, AmortizationEntry, BALANCE_EPSILON};
