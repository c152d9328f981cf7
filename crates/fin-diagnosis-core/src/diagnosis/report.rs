use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::indicators::TrafficLight;
use super::statement::FinancialStatement;
use crate::{DiagnosisError, DiagnosisResult};

const MAX_SCORE: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Company metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodType {
    #[default]
    Anual,
    Semestral,
    Trimestral,
}

impl std::fmt::Display for PeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Anual => "Anual",
            Self::Semestral => "Semestral",
            Self::Trimestral => "Trimestral",
        };
        write!(f, "{}", s)
    }
}

/// Company metadata handed to the report generator alongside the statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(alias = "companyName")]
    pub company_name: String,
    #[serde(default)]
    pub sector: String,
    /// CIIU activity code
    #[serde(default)]
    pub activity: String,
    #[serde(default, alias = "companySize")]
    pub company_size: String,
    #[serde(default, alias = "yearConstituted", skip_serializing_if = "Option::is_none")]
    pub year_constituted: Option<i32>,
    #[serde(default, alias = "periodType")]
    pub period_type: PeriodType,
    #[serde(default, alias = "contactName", skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, alias = "contactEmail", skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
}

// ---------------------------------------------------------------------------
// Report shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Alta,
    Media,
    Baja,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Swot {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub action: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kpi: String,
    #[serde(default)]
    pub deadline: String,
    pub priority: Priority,
}

/// Structured diagnosis returned by the report generator.
///
/// Wire keys are camelCase, as the generator emits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisReport {
    /// 0-100
    pub score: Decimal,
    #[serde(default)]
    pub maturity_level: String,
    pub traffic_light: TrafficLight,
    #[serde(default)]
    pub executive_summary: String,
    #[serde(default)]
    pub swot: Swot,
    #[serde(default)]
    pub alerts: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub sector_comparison: String,
    #[serde(default)]
    pub structural_risk: String,
    #[serde(default)]
    pub action_plan: Vec<ActionItem>,
    #[serde(default)]
    pub strategic_conclusion: String,
}

// ---------------------------------------------------------------------------
// Generator seam
// ---------------------------------------------------------------------------

/// Produces the raw text of a diagnosis report for a company's statements.
///
/// Implementations typically call a hosted language model; the text is
/// expected to contain a single JSON object in the [`DiagnosisReport`] shape.
pub trait DiagnosisGenerator {
    fn generate(
        &self,
        profile: &CompanyProfile,
        statements: &[FinancialStatement],
    ) -> DiagnosisResult<String>;
}

/// Generator that replays a previously captured response.
#[derive(Debug, Clone)]
pub struct StaticGenerator {
    response: String,
}

impl StaticGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl DiagnosisGenerator for StaticGenerator {
    fn generate(
        &self,
        _profile: &CompanyProfile,
        _statements: &[FinancialStatement],
    ) -> DiagnosisResult<String> {
        Ok(self.response.clone())
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse raw generator output into a validated report.
///
/// Models often wrap the object in markdown fences or prose, so the span from
/// the first `{` to the last `}` is parsed.
pub fn parse_report(raw: &str) -> DiagnosisResult<DiagnosisReport> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DiagnosisError::InvalidReport("empty response".into()));
    }

    let json = extract_json_object(trimmed).unwrap_or(trimmed);
    let report: DiagnosisReport = serde_json::from_str(json).map_err(|e| {
        log::warn!(
            "failed to parse diagnosis report: {} (raw: {})",
            e,
            trimmed.chars().take(200).collect::<String>()
        );
        DiagnosisError::InvalidReport(format!("response is not a valid report JSON: {e}"))
    })?;

    validate_report(&report)?;
    Ok(report)
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

fn validate_report(report: &DiagnosisReport) -> DiagnosisResult<()> {
    if report.score < Decimal::ZERO || report.score > MAX_SCORE {
        return Err(DiagnosisError::InvalidReport(format!(
            "score {} outside 0-100",
            report.score
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
