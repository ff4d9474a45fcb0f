use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a loan account
pub type LoanId = Uuid;

/// lifecycle moment a charge attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeTiming {
    /// paid out of the disbursed amount at drawdown
    Disbursement,
    /// charged once at loan origination
    Origination,
    /// collected alongside each installment
    Collection,
    /// any other charge, ignored by the pricing computations
    Other,
}
