use napi::Result as NapiResult;
use napi_derive::napi;

use fin_diagnosis_core::diagnosis::{horizontal, indicators, ratios, report, statement};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Ratios
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_ratios(statement_json: String) -> NapiResult<String> {
    let input: statement::FinancialStatement =
        serde_json::from_str(&statement_json).map_err(to_napi_error)?;
    let output = ratios::compute_ratios(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Returns the JSON literal `null` for fewer than two statements.
#[napi]
pub fn horizontal_analysis(statements_json: String) -> NapiResult<String> {
    let input: Vec<statement::FinancialStatement> =
        serde_json::from_str(&statements_json).map_err(to_napi_error)?;
    let output = horizontal::horizontal_analysis(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn classify_indicators(statement_json: String) -> NapiResult<String> {
    let input: statement::FinancialStatement =
        serde_json::from_str(&statement_json).map_err(to_napi_error)?;
    let output = indicators::classify_indicators(&ratios::compute_ratios(&input));
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Diagnosis
// ---------------------------------------------------------------------------

#[napi]
pub fn run_diagnosis(input_json: String) -> NapiResult<String> {
    let input: fin_diagnosis_core::diagnosis::DiagnosisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fin_diagnosis_core::diagnosis::run_diagnosis(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Validate raw generator text and return the normalised report JSON.
#[napi]
pub fn parse_report(raw: String) -> NapiResult<String> {
    let output = report::parse_report(&raw).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
