//! Projection engine: stakeholder cash flows and results for one scenario

mod assembler;
mod engine;
mod cashflows;

pub use assembler::{CashFlowAssembler, StakeholderCashFlows};
pub use engine::{ProjectionEngine, evaluate};
pub use cashflows::{CashflowRow, CashFlowResult, ResultSummary};
