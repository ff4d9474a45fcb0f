pub mod cashflow;
pub mod cat;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod loan;
pub mod rates;
pub mod types;
pub mod xirr;

// re-export key types
pub use cashflow::{build_cat_cash_flows, CashFlowEntry};
pub use cat::CatRateCalculator;
pub use config::{CalculationConfig, RoundingMode};
pub use decimal::{Money, Rate};
pub use errors::{PricingError, Result};
pub use loan::{Installment, LoanCharge, LoanSnapshot};
pub use rates::{EffectiveRateEngine, InstallmentFactor, ProjectionEngine};
pub use types::{ChargeTiming, LoanId};
pub use xirr::XirrSolver;

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
