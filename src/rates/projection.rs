use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};

use crate::config::CalculationConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{PricingError, Result};
use crate::loan::LoanSnapshot;
use crate::rates::effective::EffectiveRateEngine;
use crate::rates::DAYS_IN_YEAR;
use crate::types::ChargeTiming;

/// discount factor for one installment
///
/// the exponent counts days from the installment's due date forward to the
/// LAST installment's due date, unlike the CAT cash-flow series which counts
/// from disbursement
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentFactor {
    pub due_date: NaiveDate,
    pub days_to_last: u32,
    pub factor: Decimal,
}

/// engine projecting a loan's disbursed amount forward and deriving
/// per-installment factors from the effective VAT-loaded rate
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionEngine {
    pub config: CalculationConfig,
}

impl ProjectionEngine {
    pub fn new(config: CalculationConfig) -> Self {
        Self { config }
    }

    /// future value of an amount at the effective annual rate over a day count
    pub fn loan_future_value(&self, amount: Money, effective: Rate, duration_days: u32) -> Money {
        let base = Decimal::ONE + effective.as_fraction();
        let exponent = Decimal::from(duration_days) / DAYS_IN_YEAR;
        let projected = amount.as_decimal() * base.powd(exponent);

        Money::from_decimal(projected)
            .round_dp_with_strategy(self.config.rate_scale, self.config.rounding.strategy())
    }

    /// per-installment discount factors at the effective annual rate
    pub fn installment_factors(
        &self,
        snapshot: &LoanSnapshot,
        effective: Rate,
    ) -> Result<Vec<InstallmentFactor>> {
        let last = snapshot
            .last_installment()
            .ok_or_else(|| PricingError::InvalidSchedule {
                message: "no installments to project".to_string(),
            })?;

        let base = Decimal::ONE + effective.as_fraction();
        let mut factors = Vec::with_capacity(snapshot.installments.len());

        for installment in &snapshot.installments {
            let days = (last.due_date - installment.due_date).num_days();
            if days < 0 {
                return Err(PricingError::InvalidSchedule {
                    message: format!(
                        "installment due {} falls after the final installment {}",
                        installment.due_date, last.due_date
                    ),
                });
            }

            let exponent = Decimal::from(days) / DAYS_IN_YEAR;
            factors.push(InstallmentFactor {
                due_date: installment.due_date,
                days_to_last: days as u32,
                factor: base.powd(exponent),
            });
        }

        Ok(factors)
    }

    /// level installment amount covering the projected loan value plus the
    /// VAT-loaded per-installment charge term
    pub fn total_installment_with_vat(&self, snapshot: &LoanSnapshot) -> Result<Money> {
        let effective = EffectiveRateEngine::new(self.config)
            .effective_annual_rate_with_vat(snapshot.annual_nominal_rate, snapshot.vat_rate)?;

        let duration = snapshot
            .duration_days()
            .ok_or_else(|| PricingError::InvalidSchedule {
                message: "no installments to project".to_string(),
            })?;
        if duration < 0 {
            return Err(PricingError::InvalidSchedule {
                message: "final installment precedes disbursement".to_string(),
            });
        }

        let future_value = self.loan_future_value(snapshot.principal, effective, duration as u32);
        let factors = self.installment_factors(snapshot, effective)?;
        let factor_sum: Decimal = factors.iter().map(|f| f.factor).sum();

        // the schedule import never populates a per-installment fee
        let installment_fee = Decimal::ZERO;
        let collection_charges = snapshot
            .active_charges(ChargeTiming::Collection)
            .fold(Money::ZERO, |acc, c| acc + c.amount);
        let per_installment_charge =
            collection_charges.as_decimal() / Decimal::from(snapshot.installments.len() as u64);

        let vat_factor = Decimal::ONE + snapshot.vat_rate.as_fraction();
        let total = future_value.as_decimal() / factor_sum
            + (installment_fee + per_installment_charge) * vat_factor;

        Ok(Money::from_decimal(total)
            .round_dp_with_strategy(self.config.rate_scale, self.config.rounding.strategy()))
    }
}
