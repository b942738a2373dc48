#![allow(clippy::expect_used)]

use rs_seo_audit::calculators::{
    personal_income_tax, split_bill, vat, CalculatorError, VatMode,
};

#[test]
fn bill_split_round_trips_the_total() {
    let split = split_bill(100_000.0, &[29_000.0, 30_000.0, 31_000.0]).expect("valid bill");

    assert_eq!(split.shared_fee, 10_000.0);
    assert!((split.shared_fee_per_person - 3_333.33).abs() < 0.01);
    let finals: Vec<f64> = split.people.iter().map(|p| p.final_amount).collect();
    for (got, want) in finals.iter().zip([32_333.33, 33_333.33, 34_333.33]) {
        assert!((got - want).abs() < 0.01, "{got} vs {want}");
    }
    let sum: f64 = finals.iter().sum();
    assert!((sum - 100_000.0).abs() < 0.05);
    assert_eq!(split.people[2].person, 3);
}

#[test]
fn bill_split_single_person_pays_everything() {
    let split = split_bill(250_000.0, &[0.0]).expect("valid bill");
    assert_eq!(split.people[0].final_amount, 250_000.0);
}

#[test]
fn income_tax_twenty_million_one_dependent() {
    let pit = personal_income_tax(20_000_000.0, 1).expect("valid income");

    assert!(pit.insurance_base <= 36_000_000.0);
    assert_eq!(pit.social_insurance, 1_600_000.0);
    assert_eq!(pit.health_insurance, 300_000.0);
    assert_eq!(pit.unemployment_insurance, 200_000.0);
    assert_eq!(pit.income_after_insurance, 17_900_000.0);
    assert_eq!(pit.personal_deduction, 11_000_000.0);
    assert_eq!(pit.dependent_deduction, 4_400_000.0);
    assert_eq!(pit.taxable_income, 2_500_000.0);
    assert_eq!(pit.tax_amount, 125_000.0);
    assert_eq!(pit.net_income, 17_775_000.0);
}

#[test]
fn income_tax_zero_when_deductions_cover_income() {
    let pit = personal_income_tax(12_000_000.0, 0).expect("valid income");

    assert_eq!(pit.taxable_income, 0.0);
    assert_eq!(pit.tax_amount, 0.0);
    assert_eq!(pit.net_income, pit.income_after_insurance);
}

#[test]
fn income_tax_walks_every_bracket() {
    // 100M income: insurance capped at 3.78M, 85.22M taxable.
    let pit = personal_income_tax(100_000_000.0, 0).expect("valid income");

    assert_eq!(pit.brackets.len(), 7);
    let rates: Vec<f64> = pit.brackets.iter().map(|b| b.rate).collect();
    assert_eq!(rates, vec![5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0]);
    assert_eq!(pit.brackets[6].taxable_amount, 5_220_000.0);
    let summed: f64 = pit.brackets.iter().map(|b| b.tax_amount).sum();
    assert!((summed - pit.tax_amount).abs() < 0.01);
}

#[test]
fn vat_common_rates() {
    for (rate, tax) in [(10.0, 50_000.0), (8.0, 40_000.0), (5.0, 25_000.0)] {
        let v = vat(500_000.0, rate, VatMode::Add).expect("valid");
        assert_eq!(v.tax_amount, tax);
        assert_eq!(v.total_with_tax, 500_000.0 + tax);

        let back = vat(v.total_with_tax, rate, VatMode::Extract).expect("valid");
        assert_eq!(back.amount_before_tax, 500_000.0);
    }
}

#[test]
fn calculator_errors_are_typed() {
    assert_eq!(split_bill(-5.0, &[1.0]), Err(CalculatorError::NonPositiveTotal));
    assert_eq!(personal_income_tax(-1.0, 0), Err(CalculatorError::NegativeIncome));
    assert_eq!(
        vat(100.0, -1.0, VatMode::Extract),
        Err(CalculatorError::RateOutOfRange(-1.0))
    );
    assert_eq!(
        CalculatorError::NegativeAmount { person: 2 }.to_string(),
        "Amount of person 2 must not be negative"
    );
}

#[test]
fn non_finite_inputs_are_rejected() {
    assert_eq!(
        split_bill(f64::NAN, &[1.0]),
        Err(CalculatorError::NotFinite("Total bill"))
    );
    assert_eq!(
        split_bill(100.0, &[10.0, f64::NAN]),
        Err(CalculatorError::NotFinite("Individual amount"))
    );
    assert_eq!(
        personal_income_tax(f64::NAN, 0),
        Err(CalculatorError::NotFinite("Income"))
    );
    assert_eq!(
        personal_income_tax(f64::INFINITY, 1),
        Err(CalculatorError::NotFinite("Income"))
    );
    assert_eq!(
        vat(f64::INFINITY, 10.0, VatMode::Add),
        Err(CalculatorError::NotFinite("Amount"))
    );
    assert!(matches!(
        vat(100.0, f64::NAN, VatMode::Add),
        Err(CalculatorError::RateOutOfRange(r)) if r.is_nan()
    ));
}
