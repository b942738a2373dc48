//! Vietnamese personal income tax and VAT.

use serde::Serialize;

use super::{round2, CalculatorError};

/// Monthly salary above which insurance is no longer charged.
pub const MAX_INSURANCE_SALARY: f64 = 36_000_000.0;
/// Employee share of social insurance, percent.
pub const SOCIAL_INSURANCE_RATE: f64 = 8.0;
/// Employee share of health insurance, percent.
pub const HEALTH_INSURANCE_RATE: f64 = 1.5;
/// Employee share of unemployment insurance, percent.
pub const UNEMPLOYMENT_INSURANCE_RATE: f64 = 1.0;
/// Monthly deduction for the taxpayer.
pub const PERSONAL_DEDUCTION: f64 = 11_000_000.0;
/// Monthly deduction per dependent.
pub const DEPENDENT_DEDUCTION: f64 = 4_400_000.0;

/// Progressive brackets as (upper bound of monthly taxable income, rate %).
const BRACKETS: [(f64, f64); 7] = [
    (5_000_000.0, 5.0),
    (10_000_000.0, 10.0),
    (18_000_000.0, 15.0),
    (32_000_000.0, 20.0),
    (52_000_000.0, 25.0),
    (80_000_000.0, 30.0),
    (f64::INFINITY, 35.0),
];

/// Tax due within one bracket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketTax {
    pub from: f64,
    /// `None` for the open top bracket.
    pub to: Option<f64>,
    pub rate: f64,
    pub taxable_amount: f64,
    pub tax_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeTaxBreakdown {
    pub monthly_income: f64,
    pub insurance_base: f64,
    pub social_insurance: f64,
    pub health_insurance: f64,
    pub unemployment_insurance: f64,
    pub total_insurance: f64,
    pub income_after_insurance: f64,
    pub personal_deduction: f64,
    pub dependent_deduction: f64,
    pub dependents: u32,
    pub total_deduction: f64,
    pub taxable_income: f64,
    pub tax_amount: f64,
    pub net_income: f64,
    pub brackets: Vec<BracketTax>,
}

/// Monthly personal income tax for an employee.
pub fn personal_income_tax(
    monthly_income: f64,
    dependents: u32,
) -> Result<IncomeTaxBreakdown, CalculatorError> {
    if !monthly_income.is_finite() {
        return Err(CalculatorError::NotFinite("Income"));
    }
    if monthly_income < 0.0 {
        return Err(CalculatorError::NegativeIncome);
    }

    let insurance_base = monthly_income.min(MAX_INSURANCE_SALARY);
    let social = insurance_base * SOCIAL_INSURANCE_RATE / 100.0;
    let health = insurance_base * HEALTH_INSURANCE_RATE / 100.0;
    let unemployment = insurance_base * UNEMPLOYMENT_INSURANCE_RATE / 100.0;
    let total_insurance = social + health + unemployment;
    let income_after_insurance = monthly_income - total_insurance;

    let dependent_deduction = DEPENDENT_DEDUCTION * f64::from(dependents);
    let total_deduction = PERSONAL_DEDUCTION + dependent_deduction;
    let taxable_income = income_after_insurance - total_deduction;

    let mut brackets = Vec::new();
    let mut tax = 0.0;
    let mut from = 0.0;
    for (to, rate) in BRACKETS {
        if taxable_income <= from {
            break;
        }
        let taxable = taxable_income.min(to) - from;
        let bracket_tax = taxable * rate / 100.0;
        tax += bracket_tax;
        brackets.push(BracketTax {
            from,
            to: to.is_finite().then_some(to),
            rate,
            taxable_amount: round2(taxable),
            tax_amount: round2(bracket_tax),
        });
        from = to;
    }

    Ok(IncomeTaxBreakdown {
        monthly_income: round2(monthly_income),
        insurance_base: round2(insurance_base),
        social_insurance: round2(social),
        health_insurance: round2(health),
        unemployment_insurance: round2(unemployment),
        total_insurance: round2(total_insurance),
        income_after_insurance: round2(income_after_insurance),
        personal_deduction: PERSONAL_DEDUCTION,
        dependent_deduction,
        dependents,
        total_deduction,
        taxable_income: round2(taxable_income.max(0.0)),
        tax_amount: round2(tax),
        net_income: round2(income_after_insurance - tax),
        brackets,
    })
}

/// Direction of a VAT calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VatMode {
    /// The amount excludes VAT; add it.
    Add,
    /// The amount includes VAT; take it out.
    Extract,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VatBreakdown {
    pub mode: VatMode,
    pub rate: f64,
    pub amount_before_tax: f64,
    pub tax_amount: f64,
    pub total_with_tax: f64,
}

/// VAT at `rate` percent. Common Vietnamese rates are 10, 8 and 5.
pub fn vat(amount: f64, rate: f64, mode: VatMode) -> Result<VatBreakdown, CalculatorError> {
    if !amount.is_finite() {
        return Err(CalculatorError::NotFinite("Amount"));
    }
    if amount <= 0.0 {
        return Err(CalculatorError::NonPositiveAmount);
    }
    if !(0.0..=100.0).contains(&rate) {
        return Err(CalculatorError::RateOutOfRange(rate));
    }

    let (before, tax, total) = match mode {
        VatMode::Add => {
            let tax = amount * rate / 100.0;
            (amount, tax, amount + tax)
        }
        VatMode::Extract => {
            let before = amount * 100.0 / (100.0 + rate);
            (before, amount - before, amount)
        }
    };

    Ok(VatBreakdown {
        mode,
        rate,
        amount_before_tax: round2(before),
        tax_amount: round2(tax),
        total_with_tax: round2(total),
    })
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_income_with_one_dependent() {
        let pit = personal_income_tax(20_000_000.0, 1).expect("valid income");

        assert_eq!(pit.insurance_base, 20_000_000.0);
        assert_eq!(pit.total_insurance, 2_100_000.0);
        assert_eq!(pit.total_deduction, 15_400_000.0);
        assert_eq!(pit.taxable_income, 2_500_000.0);
        assert_eq!(pit.tax_amount, 125_000.0);
        assert_eq!(pit.net_income, 17_775_000.0);
        assert_eq!(pit.brackets.len(), 1);
    }

    #[test]
    fn test_insurance_base_capped() {
        let pit = personal_income_tax(50_000_000.0, 0).expect("valid income");

        assert_eq!(pit.insurance_base, MAX_INSURANCE_SALARY);
        assert_eq!(pit.total_insurance, 3_780_000.0);
        // 50M - 3.78M - 11M = 35.22M taxable: four full brackets plus 3.22M at 25%
        assert_eq!(pit.taxable_income, 35_220_000.0);
        assert_eq!(pit.tax_amount, 5_555_000.0);
        assert_eq!(pit.brackets.len(), 5);
        assert_eq!(pit.brackets[4].taxable_amount, 3_220_000.0);
    }

    #[test]
    fn test_below_deductions_pays_nothing() {
        let pit = personal_income_tax(9_000_000.0, 2).expect("valid income");

        assert_eq!(pit.taxable_income, 0.0);
        assert_eq!(pit.tax_amount, 0.0);
        assert_eq!(pit.net_income, pit.income_after_insurance);
        assert!(pit.brackets.is_empty());
    }

    #[test]
    fn test_top_bracket_is_open() {
        let pit = personal_income_tax(200_000_000.0, 0).expect("valid income");
        let top = pit.brackets.last().expect("top bracket");
        assert_eq!(top.rate, 35.0);
        assert_eq!(top.to, None);
    }

    #[test]
    fn test_negative_income() {
        assert_eq!(
            personal_income_tax(-1.0, 0),
            Err(CalculatorError::NegativeIncome)
        );
    }

    #[test]
    fn test_vat_both_ways() {
        let added = vat(1_000_000.0, 10.0, VatMode::Add).expect("valid");
        assert_eq!(added.tax_amount, 100_000.0);
        assert_eq!(added.total_with_tax, 1_100_000.0);

        let extracted = vat(1_080_000.0, 8.0, VatMode::Extract).expect("valid");
        assert_eq!(extracted.amount_before_tax, 1_000_000.0);
        assert_eq!(extracted.tax_amount, 80_000.0);

        let odd = vat(100.0, 5.0, VatMode::Extract).expect("valid");
        assert_eq!(odd.amount_before_tax, 95.24);
        assert_eq!(odd.tax_amount, 4.76);
    }

    #[test]
    fn test_vat_rejections() {
        assert_eq!(vat(0.0, 10.0, VatMode::Add), Err(CalculatorError::NonPositiveAmount));
        assert_eq!(
            vat(10.0, 120.0, VatMode::Add),
            Err(CalculatorError::RateOutOfRange(120.0))
        );
    }
}
