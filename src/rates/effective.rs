use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};

use crate::config::CalculationConfig;
use crate::decimal::Rate;
use crate::errors::{PricingError, Result};
use crate::rates::{periods_per_year, DAYS_IN_YEAR};

/// engine converting nominal annual rates into effective rates
///
/// works over the fixed 30-day-month / 365-day-year convention: the nominal
/// rate is split into 365/30 periods per year and compounded back up, with an
/// optional VAT loading on the periodic rate
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectiveRateEngine {
    pub config: CalculationConfig,
}

impl EffectiveRateEngine {
    pub fn new(config: CalculationConfig) -> Self {
        Self { config }
    }

    /// effective annual rate for a nominal annual rate
    pub fn effective_annual_rate(&self, nominal: Rate) -> Result<Rate> {
        if nominal.is_negative() {
            return Err(PricingError::InvalidRate { rate: nominal });
        }
        self.compound_periodic(nominal.as_fraction() / periods_per_year())
    }

    /// effective annual rate with the periodic rate loaded by VAT
    pub fn effective_annual_rate_with_vat(&self, nominal: Rate, vat: Rate) -> Result<Rate> {
        if nominal.is_negative() {
            return Err(PricingError::InvalidRate { rate: nominal });
        }
        if vat.is_negative() {
            return Err(PricingError::InvalidRate { rate: vat });
        }
        let periodic = nominal.as_fraction() / periods_per_year()
            * (Decimal::ONE + vat.as_fraction());
        self.compound_periodic(periodic)
    }

    /// nominal annual rate backing a given effective annual rate
    pub fn nominal_annual_rate(&self, effective: Rate) -> Result<Rate> {
        if effective.is_negative() {
            return Err(PricingError::InvalidRate { rate: effective });
        }
        let exponent = periods_per_year();
        let base = Decimal::ONE + effective.as_fraction();
        let periodic = base.powd(Decimal::ONE / exponent) - Decimal::ONE;

        Ok(Rate::from_fraction(periodic * exponent)
            .round_dp_with_strategy(self.config.rate_scale, self.config.rounding.strategy()))
    }

    /// pro-rata periodic rate over an exact day count, not compounded
    pub fn periodic_interest_rate(
        &self,
        nominal: Rate,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Rate> {
        if nominal.is_negative() {
            return Err(PricingError::InvalidRate { rate: nominal });
        }
        let days = (period_end - period_start).num_days();
        if days < 0 {
            return Err(PricingError::InvalidSchedule {
                message: format!("period end {} precedes start {}", period_end, period_start),
            });
        }

        let fraction =
            nominal.as_percentage() / DAYS_IN_YEAR / Decimal::from(100) * Decimal::from(days);
        Ok(Rate::from_fraction(fraction))
    }

    fn compound_periodic(&self, periodic: Decimal) -> Result<Rate> {
        let exponent = periods_per_year();
        let base = Decimal::ONE + periodic;
        let effective = base.powd(exponent) - Decimal::ONE;

        Ok(Rate::from_fraction(effective)
            .round_dp_with_strategy(self.config.rate_scale, self.config.rounding.strategy()))
    }
}
