use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

/// rounding mode for rate and projection outputs
///
/// mirrors the strategies of `rust_decimal::RoundingStrategy` that make sense
/// for financial rounding; `RoundingStrategy` itself carries no serde impls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingMode {
    /// round half away from zero (BigDecimal HALF_UP)
    HalfUp,
    /// round half toward zero
    HalfDown,
    /// round half to even (banker's rounding)
    HalfEven,
    /// truncate toward zero
    Down,
    /// round away from zero
    Up,
}

impl RoundingMode {
    /// map to the rust_decimal strategy
    pub fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::Down => RoundingStrategy::ToZero,
            RoundingMode::Up => RoundingStrategy::AwayFromZero,
        }
    }
}

/// configuration for the rate calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationConfig {
    /// rounding mode applied to rate and projection outputs
    pub rounding: RoundingMode,
    /// decimal places kept on rate and projection outputs
    pub rate_scale: u32,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::HalfUp,
            rate_scale: 9,
        }
    }
}
