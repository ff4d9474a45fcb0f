use thiserror::Error;

use crate::decimal::Rate;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("xirr did not converge after {iterations} iterations")]
    XirrDidNotConverge {
        iterations: u32,
    },

    #[error("npv derivative vanished at rate {rate}")]
    DegenerateNpvDerivative {
        rate: f64,
    },

    #[error("cash flow series is empty")]
    EmptyCashFlowSeries,

    #[error("invalid rate: {rate}")]
    InvalidRate {
        rate: Rate,
    },

    #[error("invalid schedule: {message}")]
    InvalidSchedule {
        message: String,
    },

    #[error("rate {value} is not representable as a decimal")]
    NonRepresentableRate {
        value: f64,
    },
}

pub type Result<T> = std::result::Result<T, PricingError>;
