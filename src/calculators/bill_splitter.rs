//! Bill splitter.
//!
//! Everyone pays what they ordered plus an equal part of whatever the
//! individual amounts leave uncovered (service fee, shared dishes).

use serde::Serialize;

use super::{round2, CalculatorError};

/// One person's part of the bill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonShare {
    /// One-based position in the input.
    pub person: usize,
    pub individual_amount: f64,
    pub shared_fee: f64,
    pub final_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillSplit {
    pub total_bill: f64,
    pub total_individual: f64,
    /// Part of the bill not covered by individual amounts.
    pub shared_fee: f64,
    pub shared_fee_per_person: f64,
    pub people: Vec<PersonShare>,
    /// Sum of the unrounded final amounts; equals `total_bill` up to rounding.
    pub total_final: f64,
}

/// Split `total_bill` given what each person ordered.
pub fn split_bill(total_bill: f64, individual_amounts: &[f64]) -> Result<BillSplit, CalculatorError> {
    if !total_bill.is_finite() {
        return Err(CalculatorError::NotFinite("Total bill"));
    }
    if total_bill <= 0.0 {
        return Err(CalculatorError::NonPositiveTotal);
    }
    if individual_amounts.is_empty() {
        return Err(CalculatorError::NoPeople);
    }
    if individual_amounts.iter().any(|a| !a.is_finite()) {
        return Err(CalculatorError::NotFinite("Individual amount"));
    }
    if let Some(i) = individual_amounts.iter().position(|&a| a < 0.0) {
        return Err(CalculatorError::NegativeAmount { person: i + 1 });
    }

    let total_individual: f64 = individual_amounts.iter().sum();
    let shared_fee = total_bill - total_individual;
    if shared_fee < 0.0 {
        return Err(CalculatorError::AmountsExceedTotal {
            individual: total_individual,
            total: total_bill,
        });
    }

    let per_person = shared_fee / individual_amounts.len() as f64;
    let mut total_final = 0.0;
    let people = individual_amounts
        .iter()
        .enumerate()
        .map(|(i, &amount)| {
            let final_amount = amount + per_person;
            total_final += final_amount;
            PersonShare {
                person: i + 1,
                individual_amount: round2(amount),
                shared_fee: round2(per_person),
                final_amount: round2(final_amount),
            }
        })
        .collect();

    Ok(BillSplit {
        total_bill: round2(total_bill),
        total_individual: round2(total_individual),
        shared_fee: round2(shared_fee),
        shared_fee_per_person: round2(per_person),
        people,
        total_final: round2(total_final),
    })
}
