use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{ChargeTiming, LoanId};

/// a charge attached to the loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanCharge {
    pub name: String,
    pub amount: Money,
    pub timing: ChargeTiming,
    pub active: bool,
}

/// one scheduled installment with its component amounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub due_date: NaiveDate,
    pub principal_due: Money,
    pub fee_charges_due: Money,
    pub penalty_charges_due: Money,
    pub vat_on_interest: Money,
    pub vat_on_charge: Money,
}

impl Installment {
    /// cash amount due before VAT components
    pub fn base_amount(&self) -> Money {
        self.principal_due + self.fee_charges_due + self.penalty_charges_due
    }

    /// VAT components due with this installment
    pub fn vat_amount(&self) -> Money {
        self.vat_on_interest + self.vat_on_charge
    }
}

/// read-only financial view of a loan account
///
/// assembled by the loan service layer; the pricing computations never
/// mutate it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSnapshot {
    pub id: LoanId,
    pub currency: String,
    pub principal: Money,
    pub disbursement_date: NaiveDate,
    pub annual_nominal_rate: Rate,
    pub vat_rate: Rate,
    pub installments: Vec<Installment>,
    pub charges: Vec<LoanCharge>,
}

impl LoanSnapshot {
    /// last scheduled installment, if any
    pub fn last_installment(&self) -> Option<&Installment> {
        self.installments.last()
    }

    /// calendar days from disbursement to the last installment due date
    pub fn duration_days(&self) -> Option<i64> {
        self.last_installment()
            .map(|last| (last.due_date - self.disbursement_date).num_days())
    }

    /// active charges with the given timing
    pub fn active_charges(&self, timing: ChargeTiming) -> impl Iterator<Item = &LoanCharge> {
        self.charges
            .iter()
            .filter(move |c| c.active && c.timing == timing)
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// parse from a json string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn snapshot() -> LoanSnapshot {
        LoanSnapshot {
            id: Uuid::new_v4(),
            currency: "MXN".to_string(),
            principal: Money::from_major(10_000),
            disbursement_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            annual_nominal_rate: Rate::from_percentage(dec!(12)),
            vat_rate: Rate::from_percentage(dec!(16)),
            installments: vec![
                Installment {
                    due_date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
                    principal_due: Money::from_major(5_000),
                    fee_charges_due: Money::from_major(50),
                    penalty_charges_due: Money::ZERO,
                    vat_on_interest: Money::from_major(16),
                    vat_on_charge: Money::from_major(8),
                },
                Installment {
                    due_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                    principal_due: Money::from_major(5_000),
                    fee_charges_due: Money::from_major(50),
                    penalty_charges_due: Money::from_major(25),
                    vat_on_interest: Money::from_major(8),
                    vat_on_charge: Money::from_major(8),
                },
            ],
            charges: vec![
                LoanCharge {
                    name: "origination".to_string(),
                    amount: Money::from_major(200),
                    timing: ChargeTiming::Origination,
                    active: true,
                },
                LoanCharge {
                    name: "courier".to_string(),
                    amount: Money::from_major(150),
                    timing: ChargeTiming::Disbursement,
                    active: false,
                },
            ],
        }
    }

    #[test]
    fn test_installment_amounts() {
        let snap = snapshot();
        let first = &snap.installments[0];

        assert_eq!(first.base_amount(), Money::from_major(5_050));
        assert_eq!(first.vat_amount(), Money::from_major(24));
    }

    #[test]
    fn test_duration_days() {
        let snap = snapshot();

        assert_eq!(snap.duration_days(), Some(60));
    }

    #[test]
    fn test_active_charge_filter() {
        let snap = snapshot();

        let origination: Vec<_> = snap.active_charges(ChargeTiming::Origination).collect();
        assert_eq!(origination.len(), 1);
        assert_eq!(origination[0].name, "origination");

        // inactive charges never participate
        assert_eq!(snap.active_charges(ChargeTiming::Disbursement).count(), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let snap = snapshot();

        let json = snap.to_json_pretty().unwrap();
        let parsed = LoanSnapshot::from_json(&json).unwrap();

        assert_eq!(parsed, snap);
    }
}
