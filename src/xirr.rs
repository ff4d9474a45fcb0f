use rust_decimal::prelude::ToPrimitive;

use crate::cashflow::CashFlowEntry;
use crate::errors::{PricingError, Result};

const DAYS_IN_YEAR: f64 = 365.0;

/// Newton-Raphson solver for the extended internal rate of return
///
/// finds the discount rate that zeroes the net present value of an irregular
/// cash-flow series. The derivative is approximated by a finite difference
/// whose step is the same epsilon used as the convergence tolerance. One
/// initial guess, no bracketing fallback; a series whose NPV curve never
/// crosses zero fails at the iteration cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XirrSolver {
    pub max_iterations: u32,
    pub tolerance: f64,
}

impl Default for XirrSolver {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 0.001,
        }
    }
}

impl XirrSolver {
    pub fn new(max_iterations: u32, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// solve for the rate, returned as a fraction (0.085 for 8.5%)
    pub fn solve(&self, series: &[CashFlowEntry]) -> Result<f64> {
        if series.is_empty() {
            return Err(PricingError::EmptyCashFlowSeries);
        }

        let mut guess = 0.10;
        for _ in 0..self.max_iterations {
            let value = npv(series, guess);
            let derivative = (npv(series, guess + self.tolerance) - value) / self.tolerance;

            if derivative == 0.0 || !derivative.is_finite() {
                return Err(PricingError::DegenerateNpvDerivative { rate: guess });
            }

            let next = guess - value / derivative;
            if (next - guess).abs() <= self.tolerance {
                return Ok(next);
            }
            guess = next;
        }

        Err(PricingError::XirrDidNotConverge {
            iterations: self.max_iterations,
        })
    }
}

/// net present value of the series at the given rate
fn npv(series: &[CashFlowEntry], rate: f64) -> f64 {
    series
        .iter()
        .map(|entry| {
            let amount = entry.amount.to_f64().unwrap_or(0.0);
            let years = f64::from(entry.days_since_disbursement) / DAYS_IN_YEAR;
            amount / (1.0 + rate).powf(years)
        })
        .sum()
}
