pub mod effective;
pub mod projection;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub use effective::EffectiveRateEngine;
pub use projection::{InstallmentFactor, ProjectionEngine};

/// day-count constants of the fixed 30-day-month / 365-day-year convention
pub(crate) const DAYS_IN_YEAR: Decimal = dec!(365);
pub(crate) const DAYS_IN_MONTH: Decimal = dec!(30);

/// periods per year under the convention, the exponent of every
/// effective-rate formula in this module
pub(crate) fn periods_per_year() -> Decimal {
    DAYS_IN_YEAR / DAYS_IN_MONTH
}
