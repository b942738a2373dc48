//! Business calculators served next to the audit.
//!
//! All amounts are Vietnamese dong as `f64`. Reported values are rounded to
//! two decimals; intermediate sums are not.

pub mod bill_splitter;
pub mod tax;

pub use bill_splitter::{split_bill, BillSplit, PersonShare};
pub use tax::{
    personal_income_tax, vat, BracketTax, IncomeTaxBreakdown, VatBreakdown, VatMode,
};

/// Invalid calculator input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculatorError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("Total bill must be greater than 0")]
    NonPositiveTotal,

    #[error("Enter an amount for at least one person")]
    NoPeople,

    #[error("Amount of person {person} must not be negative")]
    NegativeAmount {
        /// One-based position in the input.
        person: usize,
    },

    #[error("Individual amounts ({individual}) exceed the total bill ({total})")]
    AmountsExceedTotal { individual: f64, total: f64 },

    #[error("Income must not be negative")]
    NegativeIncome,

    #[error("Amount must be greater than 0")]
    NonPositiveAmount,

    #[error("Tax rate must be between 0% and 100%, got {0}%")]
    RateOutOfRange(f64),
}

/// Round half away from zero to two decimals.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
