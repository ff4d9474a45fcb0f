use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{PricingError, Result};
use crate::loan::LoanSnapshot;
use crate::types::ChargeTiming;

/// one cash event in the CAT series
///
/// negative amounts are outflows (the disbursement net of charges), positive
/// amounts are inflows (installment payments); entry 0 is the disbursement
/// event at day 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    pub amount: Decimal,
    pub days_since_disbursement: u32,
}

impl CashFlowEntry {
    pub fn new(amount: Decimal, days_since_disbursement: u32) -> Self {
        Self {
            amount,
            days_since_disbursement,
        }
    }
}

/// build the ordered cash-flow series the CAT rate solver consumes
///
/// the disbursement entry nets active disbursement charges against the
/// principal; when VAT is not charged per installment, the VAT portion of
/// active origination charges is borne upfront and deepens the outflow
pub fn build_cat_cash_flows(
    snapshot: &LoanSnapshot,
    vat_required: bool,
) -> Result<Vec<CashFlowEntry>> {
    let mut series = Vec::with_capacity(snapshot.installments.len() + 1);

    let mut disbursed = -snapshot.principal;
    if !vat_required {
        for charge in snapshot.active_charges(ChargeTiming::Origination) {
            let vat_portion = charge.amount * snapshot.vat_rate.as_fraction();
            disbursed -= vat_portion;
        }
    }
    for charge in snapshot.active_charges(ChargeTiming::Disbursement) {
        disbursed += charge.amount;
    }
    series.push(CashFlowEntry::new(disbursed.as_decimal(), 0));

    for installment in &snapshot.installments {
        let days = (installment.due_date - snapshot.disbursement_date).num_days();
        if days < 0 {
            return Err(PricingError::InvalidSchedule {
                message: format!(
                    "installment due {} precedes disbursement {}",
                    installment.due_date, snapshot.disbursement_date
                ),
            });
        }

        let mut amount = installment.base_amount();
        if vat_required {
            amount += installment.vat_amount();
        }
        series.push(CashFlowEntry::new(amount.as_decimal(), days as u32));
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::loan::{Installment, LoanCharge};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn base_snapshot() -> LoanSnapshot {
        LoanSnapshot {
            id: Uuid::new_v4(),
            currency: "MXN".to_string(),
            principal: Money::from_major(1_000),
            disbursement_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            annual_nominal_rate: Rate::from_percentage(dec!(12)),
            vat_rate: Rate::from_percentage(dec!(16)),
            installments: vec![Installment {
                due_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
                principal_due: Money::from_major(1_000),
                fee_charges_due: Money::from_major(60),
                penalty_charges_due: Money::from_major(40),
                vat_on_interest: Money::from_major(19),
                vat_on_charge: Money::from_major(9),
            }],
            charges: Vec::new(),
        }
    }

    #[test]
    fn test_disbursement_entry_is_negative_principal() {
        let snap = base_snapshot();

        let series = build_cat_cash_flows(&snap, true).unwrap();

        assert_eq!(series[0].amount, dec!(-1000));
        assert_eq!(series[0].days_since_disbursement, 0);
    }

    #[test]
    fn test_installment_entry_without_vat() {
        let snap = base_snapshot();

        let series = build_cat_cash_flows(&snap, false).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[1].amount, dec!(1100));
        assert_eq!(series[1].days_since_disbursement, 365);
    }

    #[test]
    fn test_installment_entry_with_vat() {
        let snap = base_snapshot();

        let series = build_cat_cash_flows(&snap, true).unwrap();

        assert_eq!(series[1].amount, dec!(1128));
    }

    #[test]
    fn test_origination_vat_deepens_outflow_when_vat_not_required() {
        let mut snap = base_snapshot();
        snap.charges.push(LoanCharge {
            name: "origination".to_string(),
            amount: Money::from_major(200),
            timing: ChargeTiming::Origination,
            active: true,
        });

        let series = build_cat_cash_flows(&snap, false).unwrap();

        // 200 * 16% = 32 of upfront VAT on top of the principal outflow
        assert_eq!(series[0].amount, dec!(-1032));

        // with VAT charged per installment the origination VAT stays out of
        // the disbursement entry
        let with_vat = build_cat_cash_flows(&snap, true).unwrap();
        assert_eq!(with_vat[0].amount, dec!(-1000));
    }

    #[test]
    fn test_disbursement_charge_shrinks_outflow() {
        let mut snap = base_snapshot();
        snap.charges.push(LoanCharge {
            name: "insurance".to_string(),
            amount: Money::from_major(150),
            timing: ChargeTiming::Disbursement,
            active: true,
        });

        let series = build_cat_cash_flows(&snap, true).unwrap();

        assert_eq!(series[0].amount, dec!(-850));
    }

    #[test]
    fn test_multiple_charges_accumulate_and_inactive_skip() {
        let mut snap = base_snapshot();
        snap.charges.extend([
            LoanCharge {
                name: "fee a".to_string(),
                amount: Money::from_major(100),
                timing: ChargeTiming::Disbursement,
                active: true,
            },
            LoanCharge {
                name: "fee b".to_string(),
                amount: Money::from_major(50),
                timing: ChargeTiming::Disbursement,
                active: true,
            },
            LoanCharge {
                name: "waived".to_string(),
                amount: Money::from_major(500),
                timing: ChargeTiming::Disbursement,
                active: false,
            },
            LoanCharge {
                name: "collection".to_string(),
                amount: Money::from_major(75),
                timing: ChargeTiming::Collection,
                active: true,
            },
        ]);

        let series = build_cat_cash_flows(&snap, true).unwrap();

        // 100 + 50 applied, waived and collection charges ignored
        assert_eq!(series[0].amount, dec!(-850));
    }

    #[test]
    fn test_due_date_before_disbursement_rejected() {
        let mut snap = base_snapshot();
        snap.installments[0].due_date = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();

        let result = build_cat_cash_flows(&snap, true);

        assert!(matches!(
            result,
            Err(PricingError::InvalidSchedule { .. })
        ));
    }

    #[test]
    fn test_entries_follow_schedule_order() {
        let mut snap = base_snapshot();
        snap.installments = (1..=6)
            .map(|month| Installment {
                due_date: NaiveDate::from_ymd_opt(2024, 1 + month, 1).unwrap(),
                principal_due: Money::from_major(200),
                fee_charges_due: Money::ZERO,
                penalty_charges_due: Money::ZERO,
                vat_on_interest: Money::ZERO,
                vat_on_charge: Money::ZERO,
            })
            .collect();

        let series = build_cat_cash_flows(&snap, false).unwrap();

        assert_eq!(series.len(), 7);
        for window in series[1..].windows(2) {
            assert!(window[0].days_since_disbursement < window[1].days_since_disbursement);
        }
    }
}
