use serde::{Deserialize, Serialize};

use super::ratios::{compute_ratios, percent_or_zero};
use super::statement::FinancialStatement;
use crate::types::*;

/// Period-over-period variation between two adjacent statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationSet {
    /// "`previous` vs `current`"
    pub period: String,
    pub operating_income_var: Percent,
    pub net_profit_var: Percent,
    pub assets_var: Percent,
}

/// Percentage change from `previous` to `current`; zero when `previous` is zero.
pub fn variation(current: Money, previous: Money) -> Percent {
    percent_or_zero(current.saturating_sub(previous), previous)
}

/// Horizontal analysis over statements in the order supplied.
///
/// Returns `None` for fewer than two statements. Otherwise one entry per
/// adjacent pair, so the result always has `statements.len() - 1` items.
pub fn horizontal_analysis(statements: &[FinancialStatement]) -> Option<Vec<VariationSet>> {
    if statements.len() < 2 {
        return None;
    }

    let variations = statements
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            VariationSet {
                period: format!("{} vs {}", prev.period, curr.period),
                operating_income_var: variation(
                    curr.income_statement.operating_income,
                    prev.income_statement.operating_income,
                ),
                net_profit_var: variation(
                    compute_ratios(curr).net_profit,
                    compute_ratios(prev).net_profit,
                ),
                assets_var: variation(
                    curr.balance_sheet.total_assets,
                    prev.balance_sheet.total_assets,
                ),
            }
        })
        .collect();

    Some(variations)
}
