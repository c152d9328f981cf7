pub mod horizontal;
pub mod indicators;
pub mod ratios;
pub mod report;
pub mod statement;

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{types::*, DiagnosisError, DiagnosisResult};

use horizontal::{horizontal_analysis, VariationSet};
use indicators::{classify_indicators, Indicator};
use ratios::{compute_ratios, RatioSet};
use report::{parse_report, CompanyProfile, DiagnosisGenerator, DiagnosisReport};
use statement::FinancialStatement;

/// Maximum number of periods accepted per diagnosis.
pub const MAX_PERIODS: usize = 3;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<CompanyProfile>,
    /// Chronological, caller-supplied order.
    pub statements: Vec<FinancialStatement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRatios {
    pub period: String,
    pub ratios: RatioSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisOutput {
    pub periods: Vec<PeriodRatios>,
    pub horizontal: Option<Vec<VariationSet>>,
    /// Traffic lights for the most recent period.
    pub latest_indicators: Vec<Indicator>,
}

/// Computed figures plus the parsed generator report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullDiagnosis {
    pub analysis: ComputationOutput<DiagnosisOutput>,
    pub report: DiagnosisReport,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Ratios for every period, horizontal analysis and latest-period indicators.
pub fn run_diagnosis(
    input: &DiagnosisInput,
) -> DiagnosisResult<ComputationOutput<DiagnosisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let mut periods = Vec::with_capacity(input.statements.len());
    for statement in &input.statements {
        let ratios = compute_ratios(statement);
        collect_warnings(statement, &ratios, &mut warnings);
        periods.push(PeriodRatios {
            period: statement.period.clone(),
            ratios,
        });
    }

    let horizontal = horizontal_analysis(&input.statements);
    if horizontal.is_none() {
        warnings.push("Single period supplied; horizontal analysis not applicable.".into());
    }

    let latest_indicators = periods
        .last()
        .map(|p| classify_indicators(&p.ratios))
        .unwrap_or_default();

    log::debug!(
        "diagnosis over {} period(s) produced {} warning(s)",
        periods.len(),
        warnings.len()
    );

    let output = DiagnosisOutput {
        periods,
        horizontal,
        latest_indicators,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "zero_denominator_policy": "ratio reported as 0",
        "totals": "supplied total_assets / total_liabilities used as given",
        "period_order": "caller-supplied, not sorted",
        "indicator_period": "last statement"
    });

    Ok(with_metadata(
        "Small-business ratio diagnosis with horizontal analysis",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Run the numeric diagnosis, then obtain and parse a report from `generator`.
pub fn diagnose_with<G: DiagnosisGenerator + ?Sized>(
    generator: &G,
    input: &DiagnosisInput,
) -> DiagnosisResult<FullDiagnosis> {
    let profile = input
        .profile
        .as_ref()
        .ok_or_else(|| DiagnosisError::InvalidInput {
            field: "profile".into(),
            reason: "A company profile is required to generate a report.".into(),
        })?;

    let analysis = run_diagnosis(input)?;
    let raw = generator.generate(profile, &input.statements)?;
    let report = parse_report(&raw)?;

    Ok(FullDiagnosis { analysis, report })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &DiagnosisInput) -> DiagnosisResult<()> {
    let n = input.statements.len();
    if n == 0 {
        return Err(DiagnosisError::InvalidInput {
            field: "statements".into(),
            reason: "At least one period is required.".into(),
        });
    }
    if n > MAX_PERIODS {
        return Err(DiagnosisError::InvalidInput {
            field: "statements".into(),
            reason: format!("At most {MAX_PERIODS} periods are supported, got {n}."),
        });
    }
    if let Some(idx) = input
        .statements
        .iter()
        .position(|s| s.period.trim().is_empty())
    {
        return Err(DiagnosisError::InvalidInput {
            field: format!("statements[{idx}].period"),
            reason: "Period label must not be empty.".into(),
        });
    }
    Ok(())
}

fn collect_warnings(
    statement: &FinancialStatement,
    ratios: &RatioSet,
    warnings: &mut Vec<String>,
) {
    let is = &statement.income_statement;
    let bs = &statement.balance_sheet;
    let p = &statement.period;

    if bs.is_blank() {
        warnings.push(format!("{p}: balance sheet left blank; balance ratios reported as 0."));
    }
    if is.operating_income.is_zero() {
        warnings.push(format!("{p}: operating income is zero; margins reported as 0."));
    }
    if bs.short_term_obligations().is_zero() {
        warnings.push(format!(
            "{p}: no short-term obligations; liquidity reported as 0."
        ));
    }
    if bs.total_assets.is_zero() {
        warnings.push(format!("{p}: total assets are zero; debt ratio reported as 0."));
    }
    // Debt-free companies have nothing to cover.
    if is.interest.is_zero() && !ratios.operating_profit.is_zero() {
        warnings.push(format!("{p}: interest is zero; coverage reported as 0."));
    }
    if !bs.totals_consistent() {
        warnings.push(format!(
            "{p}: supplied totals differ from their components (assets {} vs {}, liabilities {} vs {}).",
            bs.total_assets,
            bs.component_assets(),
            bs.total_liabilities,
            bs.component_liabilities()
        ));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use super::report::StaticGenerator;
    use super::statement::{BalanceSheet, IncomeStatement};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn statement(period: &str, operating_income: Money) -> FinancialStatement {
        FinancialStatement::new(
            period,
            IncomeStatement {
                operating_income,
                costs: dec!(400),
                admin_expenses: dec!(100),
                sales_expenses: dec!(50),
                interest: dec!(45),
                ..Default::default()
            },
            BalanceSheet {
                current_assets: dec!(500),
                non_current_assets: dec!(400),
                accounts_receivable: dec!(100),
                current_liabilities: dec!(300),
                non_current_liabilities: dec!(200),
                accounts_payable: dec!(100),
                ..Default::default()
            }
            .with_derived_totals(),
        )
    }

    fn input(statements: Vec<FinancialStatement>) -> DiagnosisInput {
        DiagnosisInput {
            profile: None,
            statements,
        }
    }

    #[test]
    fn test_three_period_diagnosis() {
        let out = run_diagnosis(&input(vec![
            statement("2021", dec!(1000)),
            statement("2022", dec!(1100)),
            statement("2023", dec!(1210)),
        ]))
        .unwrap();
        let r = &out.result;
        assert_eq!(r.periods.len(), 3);
        assert_eq!(r.periods[0].ratios.gross_profit, dec!(600));
        let horizontal = r.horizontal.as_ref().unwrap();
        assert_eq!(horizontal.len(), 2);
        assert_eq!(horizontal[1].period, "2022 vs 2023");
        assert_eq!(horizontal[1].operating_income_var, dec!(10));
        assert_eq!(r.latest_indicators.len(), 4);
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
    }

    #[test]
    fn test_single_period_warns_without_horizontal() {
        let out = run_diagnosis(&input(vec![statement("2023", dec!(1000))])).unwrap();
        assert!(out.result.horizontal.is_none());
        assert!(out.warnings.iter().any(|w| w.contains("horizontal")));
    }

    #[test]
    fn test_period_count_validated() {
        let err = run_diagnosis(&input(vec![])).unwrap_err();
        match err {
            DiagnosisError::InvalidInput { field, .. } => assert_eq!(field, "statements"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }

        let four = (1..=4).map(|i| statement(&i.to_string(), dec!(1000))).collect();
        assert!(run_diagnosis(&input(four)).is_err());
    }

    #[test]
    fn test_blank_period_label_rejected() {
        let err = run_diagnosis(&input(vec![statement("2022", dec!(1)), statement(" ", dec!(1))]))
            .unwrap_err();
        match err {
            DiagnosisError::InvalidInput { field, .. } => {
                assert_eq!(field, "statements[1].period")
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_denominator_warnings() {
        let out = run_diagnosis(&input(vec![FinancialStatement::new(
            "blank",
            IncomeStatement::default(),
            BalanceSheet::default(),
        )]))
        .unwrap();
        let w = out.warnings.join("\n");
        assert!(w.contains("margins reported as 0"));
        assert!(w.contains("liquidity reported as 0"));
        assert!(w.contains("debt ratio reported as 0"));
        assert!(w.contains("balance sheet left blank"));
        // operating profit is zero too, so there is nothing to cover
        assert!(!w.contains("coverage reported as 0"));
    }

    #[test]
    fn test_coverage_warning_only_with_operating_profit() {
        let mut s = statement("2023", dec!(1000));
        s.income_statement.interest = Decimal::ZERO;
        let out = run_diagnosis(&input(vec![s])).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("coverage reported as 0")));
        assert!(!out.warnings.iter().any(|w| w.contains("left blank")));

        let mut break_even = statement("2023", dec!(550));
        break_even.income_statement.interest = Decimal::ZERO;
        let out = run_diagnosis(&input(vec![break_even])).unwrap();
        assert!(!out.warnings.iter().any(|w| w.contains("coverage")));
    }

    #[test]
    fn test_inconsistent_totals_warn_but_are_used() {
        let mut s = statement("2023", dec!(1000));
        s.balance_sheet.total_assets = dec!(2000);
        let out = run_diagnosis(&input(vec![s])).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("differ")));
        // 600 / 2000 * 100
        assert_eq!(out.result.periods[0].ratios.debt_ratio, dec!(30));
    }

    #[test]
    fn test_diagnose_with_requires_profile() {
        let generator = StaticGenerator::new(r#"{"score": 80, "trafficLight": "green"}"#);
        let err = diagnose_with(&generator, &input(vec![statement("2023", dec!(1000))]))
            .unwrap_err();
        assert!(matches!(err, DiagnosisError::InvalidInput { .. }));
    }

    #[test]
    fn test_diagnose_with_static_generator() {
        let generator = StaticGenerator::new(
            "```json\n{\"score\": 80, \"trafficLight\": \"green\", \"alerts\": [\"ok\"]}\n```",
        );
        let mut inp = input(vec![statement("2022", dec!(1000)), statement("2023", dec!(1200))]);
        inp.profile = Some(CompanyProfile {
            company_name: "Acme SAS".into(),
            ..Default::default()
        });
        let full = diagnose_with(&generator, &inp).unwrap();
        assert_eq!(full.report.score, dec!(80));
        assert_eq!(full.analysis.result.periods.len(), 2);
    }
}
