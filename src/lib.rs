//! Battery NPV - cash-flow projection engine for shared-savings battery storage projects
//!
//! This library provides:
//! - Escalating savings split between the investor (EQORE) and the host customer
//! - Bonus plus declining-balance depreciation and its tax shield
//! - Loan amortization with level payments
//! - Levered customer, investor and total project cash flows
//! - NPV, IRR, MIRR and discounted payback for each series

pub mod error;
pub mod config;
pub mod schedule;
pub mod projection;
pub mod metrics;
pub mod scenario;

// Re-export commonly used types
pub use error::{ConfigError, LoadError, MetricError};
pub use config::{Preset, ScenarioConfig, ScenarioRequest};
pub use schedule::YearSeries;
pub use projection::{evaluate, CashFlowResult, CashflowRow, ProjectionEngine};
pub use metrics::{MetricOutcome, Payback};
pub use scenario::ScenarioRunner;
