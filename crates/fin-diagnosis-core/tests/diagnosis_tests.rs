use fin_diagnosis_core::diagnosis::horizontal::horizontal_analysis;
use fin_diagnosis_core::diagnosis::indicators::{IndicatorKind, TrafficLight};
use fin_diagnosis_core::diagnosis::ratios::{compute_ratios, RatioSet};
use fin_diagnosis_core::diagnosis::report::StaticGenerator;
use fin_diagnosis_core::diagnosis::statement::{BalanceSheet, FinancialStatement, IncomeStatement};
use fin_diagnosis_core::diagnosis::{diagnose_with, run_diagnosis, DiagnosisInput};
use fin_diagnosis_core::DiagnosisError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Ratio scenarios
// ===========================================================================

#[test]
fn test_income_statement_scenario() {
    let statement = FinancialStatement::new(
        "2023",
        IncomeStatement {
            operating_income: dec!(1000),
            costs: dec!(400),
            admin_expenses: dec!(100),
            sales_expenses: dec!(50),
            ..Default::default()
        },
        BalanceSheet {
            current_assets: dec!(500),
            accounts_receivable: dec!(100),
            current_liabilities: dec!(300),
            accounts_payable: dec!(100),
            total_liabilities: dec!(600),
            total_assets: dec!(1000),
            ..Default::default()
        },
    );

    let r = compute_ratios(&statement);
    assert_eq!(
        r,
        RatioSet {
            gross_profit: dec!(600),
            operating_profit: dec!(450),
            net_profit: dec!(450),
            gross_margin: dec!(60),
            operating_margin: dec!(45),
            net_margin: dec!(45),
            liquidity: dec!(1.5),
            debt_ratio: dec!(60),
            interest_coverage: Decimal::ZERO,
            working_capital: dec!(200),
        }
    );
}

#[test]
fn test_out_of_range_sums_saturate_instead_of_panicking() {
    let json = r#"[
        {
            "period": "2022",
            "income_statement": {
                "operating_income": "50000000000000000000000000000",
                "costs": "-50000000000000000000000000000"
            }
        },
        {
            "period": "2023",
            "income_statement": { "operating_income": "-50000000000000000000000000000" }
        }
    ]"#;
    let statements: Vec<FinancialStatement> = serde_json::from_str(json).unwrap();

    let r = compute_ratios(&statements[0]);
    assert_eq!(r.gross_profit, Decimal::MAX);
    assert_eq!(r.net_profit, Decimal::MAX);

    // -5e28 - 5e28 saturates at MIN before dividing by 5e28
    let vars = horizontal_analysis(&statements).unwrap();
    assert_eq!(vars.len(), 1);
    assert!(vars[0].operating_income_var < dec!(-100));
}

#[test]
fn test_form_payload_in_camel_case() {
    // Shape submitted by the web form, with blanks left out.
    let json = r#"[
        {
            "period": "Periodo 1",
            "incomeStatement": { "operatingIncome": 1000, "costs": 400 },
            "balanceSheet": { "currentAssets": 500, "totalAssets": 800, "totalLiabilities": 400 }
        },
        {
            "period": "Periodo 2",
            "incomeStatement": { "operatingIncome": 1500, "costs": 600 },
            "balanceSheet": { "currentAssets": 700, "totalAssets": 1000, "totalLiabilities": 400 }
        }
    ]"#;
    let statements: Vec<FinancialStatement> = serde_json::from_str(json).unwrap();
    let vars = horizontal_analysis(&statements).unwrap();

    assert_eq!(vars.len(), 1);
    assert_eq!(vars[0].period, "Periodo 1 vs Periodo 2");
    assert_eq!(vars[0].operating_income_var, dec!(50));
    // net profit 600 -> 900
    assert_eq!(vars[0].net_profit_var, dec!(50));
    assert_eq!(vars[0].assets_var, dec!(25));
}

// ===========================================================================
// Envelope
// ===========================================================================

#[test]
fn test_run_diagnosis_from_json() {
    let json = r#"{
        "profile": { "company_name": "Acme SAS", "sector": "Comercio", "period_type": "Semestral" },
        "statements": [
            {
                "period": "2023-H1",
                "income_statement": { "operating_income": 1000, "costs": 800, "interest": 10 },
                "balance_sheet": {
                    "current_assets": 300, "current_liabilities": 400,
                    "total_assets": 1000, "total_liabilities": 800
                }
            }
        ]
    }"#;
    let input: DiagnosisInput = serde_json::from_str(json).unwrap();
    let out = run_diagnosis(&input).unwrap();

    let lights: Vec<(IndicatorKind, TrafficLight)> = out
        .result
        .latest_indicators
        .iter()
        .map(|i| (i.kind, i.status))
        .collect();
    assert_eq!(
        lights,
        vec![
            (IndicatorKind::NetProfit, TrafficLight::Green),
            (IndicatorKind::Liquidity, TrafficLight::Red),
            (IndicatorKind::GrossMargin, TrafficLight::Yellow),
            (IndicatorKind::DebtRatio, TrafficLight::Red),
        ]
    );
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    assert!(!out.methodology.is_empty());
}

#[test]
fn test_run_diagnosis_rejects_four_periods() {
    let statements = (0..4)
        .map(|i| FinancialStatement::new(format!("P{i}"), Default::default(), Default::default()))
        .collect();
    let err = run_diagnosis(&DiagnosisInput {
        profile: None,
        statements,
    })
    .unwrap_err();
    match err {
        DiagnosisError::InvalidInput { field, reason } => {
            assert_eq!(field, "statements");
            assert!(reason.contains('4'));
        }
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_diagnose_with_bad_report_surfaces_error() {
    let input: DiagnosisInput = serde_json::from_str(
        r#"{ "profile": { "companyName": "Acme" }, "statements": [ { "period": "2023" } ] }"#,
    )
    .unwrap();
    let err = diagnose_with(&StaticGenerator::new(""), &input).unwrap_err();
    assert!(matches!(err, DiagnosisError::InvalidReport(_)));
}
