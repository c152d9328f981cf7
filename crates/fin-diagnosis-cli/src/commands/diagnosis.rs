use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use fin_diagnosis_core::diagnosis::horizontal;
use fin_diagnosis_core::diagnosis::indicators;
use fin_diagnosis_core::diagnosis::ratios;
use fin_diagnosis_core::diagnosis::report::{self, StaticGenerator};
use fin_diagnosis_core::diagnosis::statement::{BalanceSheet, FinancialStatement, IncomeStatement};
use fin_diagnosis_core::diagnosis::{self, DiagnosisInput};
use fin_diagnosis_core::with_metadata;

use crate::input;

/// Arguments for single-period ratio calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RatiosArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Recompute total assets / liabilities from their components
    #[arg(long)]
    pub derive_totals: bool,

    /// Period label
    #[arg(long, default_value = "Periodo 1")]
    pub period: String,

    /// Operating income (revenue)
    #[arg(long)]
    pub operating_income: Option<Decimal>,

    /// Non-operating income
    #[arg(long)]
    pub non_operating_income: Option<Decimal>,

    /// Cost of sales
    #[arg(long)]
    pub costs: Option<Decimal>,

    /// Administrative expenses
    #[arg(long)]
    pub admin_expenses: Option<Decimal>,

    /// Sales expenses
    #[arg(long)]
    pub sales_expenses: Option<Decimal>,

    /// Interest expense
    #[arg(long)]
    pub interest: Option<Decimal>,

    /// Non-operating expenses
    #[arg(long)]
    pub non_operating_expenses: Option<Decimal>,

    /// Taxes
    #[arg(long)]
    pub taxes: Option<Decimal>,

    /// Current assets
    #[arg(long)]
    pub current_assets: Option<Decimal>,

    /// Non-current assets
    #[arg(long)]
    pub non_current_assets: Option<Decimal>,

    /// Accounts receivable
    #[arg(long, alias = "ar")]
    pub accounts_receivable: Option<Decimal>,

    /// Total assets
    #[arg(long)]
    pub total_assets: Option<Decimal>,

    /// Current liabilities
    #[arg(long)]
    pub current_liabilities: Option<Decimal>,

    /// Non-current liabilities
    #[arg(long)]
    pub non_current_liabilities: Option<Decimal>,

    /// Accounts payable
    #[arg(long, alias = "ap")]
    pub accounts_payable: Option<Decimal>,

    /// Total liabilities
    #[arg(long)]
    pub total_liabilities: Option<Decimal>,

    /// Equity
    #[arg(long)]
    pub equity: Option<Decimal>,
}

/// Arguments for horizontal analysis
#[derive(Args)]
pub struct HorizontalArgs {
    /// Path to JSON array of statements, oldest first
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the full diagnosis
#[derive(Args)]
pub struct DiagnoseArgs {
    /// Path to JSON diagnosis input (profile + statements)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a captured generator response to attach as the report
    #[arg(long)]
    pub report: Option<String>,
}

/// Arguments for traffic-light indicators
#[derive(Args)]
pub struct IndicatorsArgs {
    /// Path to JSON statement
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for report validation
#[derive(Args)]
pub struct ReportArgs {
    /// Path to the raw generator response (JSON, optionally fenced)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_ratios(args: RatiosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let derive_totals = args.derive_totals;
    let mut statement: FinancialStatement = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        statement_from_flags(args)
    };
    if derive_totals {
        statement.balance_sheet = statement.balance_sheet.with_derived_totals();
    }

    let result = ratios::compute_ratios(&statement);
    let output = with_metadata(
        "Single-period ratio analysis",
        &serde_json::json!({
            "period": statement.period,
            "zero_denominator_policy": "ratio reported as 0",
            "derived_totals": derive_totals
        }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_horizontal(args: HorizontalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let statements: Vec<FinancialStatement> = read_required(
        args.input.as_deref(),
        "--input <file.json> or stdin required for horizontal analysis",
    )?;

    let result = horizontal::horizontal_analysis(&statements);
    let warnings = if result.is_none() {
        vec!["Fewer than two periods supplied; horizontal analysis not applicable.".to_string()]
    } else {
        Vec::new()
    };
    let output = with_metadata(
        "Horizontal analysis (period-over-period % change)",
        &serde_json::json!({ "periods": statements.len(), "order": "as supplied" }),
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_diagnose(args: DiagnoseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let diag_input: DiagnosisInput = read_required(
        args.input.as_deref(),
        "--input <file.json> or stdin required for diagnosis",
    )?;

    match args.report {
        Some(ref path) => {
            let raw = input::file::read_text(path)?;
            let result = diagnosis::diagnose_with(&StaticGenerator::new(raw), &diag_input)?;
            Ok(serde_json::to_value(result)?)
        }
        None => {
            let result = diagnosis::run_diagnosis(&diag_input)?;
            Ok(serde_json::to_value(result)?)
        }
    }
}

pub fn run_indicators(args: IndicatorsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let statement: FinancialStatement = read_required(
        args.input.as_deref(),
        "--input <file.json> or stdin required for indicators",
    )?;
    let ratios = ratios::compute_ratios(&statement);
    let result = indicators::classify_indicators(&ratios);
    Ok(serde_json::to_value(result)?)
}

pub fn run_report(args: ReportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = match args.input {
        Some(ref path) => input::file::read_text(path)?,
        None => input::stdin::read_stdin_text()?
            .ok_or("--input <file> or stdin required for report validation")?,
    };
    let parsed = report::parse_report(&raw)?;
    let score_light = indicators::score_light(parsed.score);
    if score_light != parsed.traffic_light {
        log::info!(
            "report traffic light '{}' differs from score band '{}'",
            parsed.traffic_light,
            score_light
        );
    }

    let mut value = serde_json::to_value(&parsed)?;
    if let Value::Object(ref mut map) = value {
        map.insert("scoreLight".into(), Value::String(score_light.to_string()));
        map.insert(
            "scoreMatchesLight".into(),
            Value::Bool(score_light == parsed.traffic_light),
        );
    }
    Ok(serde_json::json!({ "result": value }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_required<T: serde::de::DeserializeOwned>(
    path: Option<&str>,
    missing: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        input::file::read_json(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err(missing.to_string().into())
    }
}

/// Build a statement from flags; omitted amounts are zero.
fn statement_from_flags(args: RatiosArgs) -> FinancialStatement {
    let z = |v: Option<Decimal>| v.unwrap_or(Decimal::ZERO);
    FinancialStatement::new(
        args.period,
        IncomeStatement {
            operating_income: z(args.operating_income),
            non_operating_income: z(args.non_operating_income),
            costs: z(args.costs),
            admin_expenses: z(args.admin_expenses),
            sales_expenses: z(args.sales_expenses),
            interest: z(args.interest),
            non_operating_expenses: z(args.non_operating_expenses),
            taxes: z(args.taxes),
        },
        BalanceSheet {
            current_assets: z(args.current_assets),
            non_current_assets: z(args.non_current_assets),
            accounts_receivable: z(args.accounts_receivable),
            total_assets: z(args.total_assets),
            current_liabilities: z(args.current_liabilities),
            non_current_liabilities: z(args.non_current_liabilities),
            accounts_payable: z(args.accounts_payable),
            total_liabilities: z(args.total_liabilities),
            equity: z(args.equity),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rust_decimal_macros::dec;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        ratios: RatiosArgs,
    }

    #[test]
    fn test_flags_default_to_zero() {
        let cli = TestCli::parse_from([
            "findx",
            "--operating-income",
            "1000",
            "--costs",
            "400",
            "--ap",
            "-50",
        ]);
        let s = statement_from_flags(cli.ratios);
        assert_eq!(s.period, "Periodo 1");
        assert_eq!(s.income_statement.operating_income, dec!(1000));
        assert_eq!(s.balance_sheet.accounts_payable, dec!(-50));
        assert_eq!(s.income_statement.taxes, Decimal::ZERO);
        assert_eq!(s.balance_sheet.total_assets, Decimal::ZERO);
    }
}
