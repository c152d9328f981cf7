use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages on a 0-100 scale (45 = 45%). Signed and unbounded.
pub type Percent = Decimal;

/// Dimensionless ratios (e.g., 1.5x liquidity)
pub type Multiple = Decimal;

const PRECISION: &str = "rust_decimal_128bit";

/// Envelope around every computation: the result plus how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

impl ComputationMetadata {
    fn current(elapsed_us: u64) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: PRECISION.to_string(),
        }
    }
}

/// Wrap a result in the standard envelope.
///
/// Assumptions that fail to serialise are recorded as `null`.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata::current(elapsed_us),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_metadata() {
        let out = with_metadata(
            "test",
            &serde_json::json!({ "k": 1 }),
            vec!["w".into()],
            42,
            Decimal::ONE,
        );
        assert_eq!(out.result, Decimal::ONE);
        assert_eq!(out.assumptions["k"], 1);
        assert_eq!(out.metadata.computation_time_us, 42);
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
        assert_eq!(out.metadata.version, env!("CARGO_PKG_VERSION"));
    }
}
