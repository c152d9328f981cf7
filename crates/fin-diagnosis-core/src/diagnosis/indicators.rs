use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ratios::RatioSet;

const LIQUIDITY_GREEN: Decimal = dec!(1.2);
const LIQUIDITY_YELLOW: Decimal = dec!(0.8);
const GROSS_MARGIN_GREEN: Decimal = dec!(30);
const GROSS_MARGIN_YELLOW: Decimal = dec!(15);
const DEBT_RATIO_GREEN: Decimal = dec!(50);
const DEBT_RATIO_YELLOW: Decimal = dec!(70);
const SCORE_GREEN: Decimal = dec!(70);
const SCORE_YELLOW: Decimal = dec!(40);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLight {
    Green,
    Yellow,
    Red,
}

impl std::fmt::Display for TrafficLight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    NetProfit,
    Liquidity,
    GrossMargin,
    DebtRatio,
}

impl IndicatorKind {
    /// Label shown on the report dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NetProfit => "Utilidad Neta",
            Self::Liquidity => "Liquidez",
            Self::GrossMargin => "Margen Bruto",
            Self::DebtRatio => "Endeudamiento",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub kind: IndicatorKind,
    pub label: String,
    pub value: Decimal,
    pub status: TrafficLight,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Classify a ratio set into the four dashboard traffic lights.
///
/// Thresholds are strict: a liquidity of exactly 1.2 is yellow, a debt ratio
/// of exactly 50 is yellow.
pub fn classify_indicators(ratios: &RatioSet) -> Vec<Indicator> {
    [
        (IndicatorKind::NetProfit, ratios.net_profit),
        (IndicatorKind::Liquidity, ratios.liquidity),
        (IndicatorKind::GrossMargin, ratios.gross_margin),
        (IndicatorKind::DebtRatio, ratios.debt_ratio),
    ]
    .into_iter()
    .map(|(kind, value)| Indicator {
        kind,
        label: kind.label().to_string(),
        value,
        status: classify(kind, value),
    })
    .collect()
}

/// Traffic light for a single indicator value.
pub fn classify(kind: IndicatorKind, value: Decimal) -> TrafficLight {
    match kind {
        IndicatorKind::NetProfit => {
            if value > Decimal::ZERO {
                TrafficLight::Green
            } else {
                TrafficLight::Red
            }
        }
        IndicatorKind::Liquidity => higher_is_better(value, LIQUIDITY_GREEN, LIQUIDITY_YELLOW),
        IndicatorKind::GrossMargin => {
            higher_is_better(value, GROSS_MARGIN_GREEN, GROSS_MARGIN_YELLOW)
        }
        IndicatorKind::DebtRatio => match value {
            v if v < DEBT_RATIO_GREEN => TrafficLight::Green,
            v if v < DEBT_RATIO_YELLOW => TrafficLight::Yellow,
            _ => TrafficLight::Red,
        },
    }
}

/// Traffic light for an overall 0-100 diagnosis score (inclusive bands).
pub fn score_light(score: Decimal) -> TrafficLight {
    match score {
        s if s >= SCORE_GREEN => TrafficLight::Green,
        s if s >= SCORE_YELLOW => TrafficLight::Yellow,
        _ => TrafficLight::Red,
    }
}

fn higher_is_better(value: Decimal, green: Decimal, yellow: Decimal) -> TrafficLight {
    match value {
        v if v > green => TrafficLight::Green,
        v if v > yellow => TrafficLight::Yellow,
        _ => TrafficLight::Red,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
