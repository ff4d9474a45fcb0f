use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::cashflow::build_cat_cash_flows;
use crate::config::CalculationConfig;
use crate::decimal::Rate;
use crate::errors::{PricingError, Result};
use crate::loan::LoanSnapshot;
use crate::xirr::XirrSolver;

/// calculator for the CAT (total annual cost) rate of a loan
///
/// builds the cash-flow series from the loan snapshot and solves for the
/// discount rate that zeroes its net present value
#[derive(Debug, Clone, Copy, Default)]
pub struct CatRateCalculator {
    pub solver: XirrSolver,
    pub config: CalculationConfig,
}

impl CatRateCalculator {
    pub fn new(solver: XirrSolver, config: CalculationConfig) -> Self {
        Self { solver, config }
    }

    /// compute the CAT rate as an annual percentage
    pub fn compute_cat_rate(&self, snapshot: &LoanSnapshot, vat_required: bool) -> Result<Rate> {
        let series = build_cat_cash_flows(snapshot, vat_required)?;
        let fraction = self.solver.solve(&series)?;

        let percentage = Decimal::from_f64(fraction * 100.0)
            .ok_or(PricingError::NonRepresentableRate { value: fraction })?;

        Ok(Rate::from_percentage(percentage)
            .round_dp_with_strategy(self.config.rate_scale, self.config.rounding.strategy()))
    }
}
