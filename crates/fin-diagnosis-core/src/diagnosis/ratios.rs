use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::statement::FinancialStatement;
use crate::types::*;

const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Output type
// ---------------------------------------------------------------------------

/// Profitability, liquidity, leverage and coverage figures for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioSet {
    // Profit
    pub gross_profit: Money,
    pub operating_profit: Money,
    pub net_profit: Money,
    // Margins
    pub gross_margin: Percent,
    pub operating_margin: Percent,
    pub net_margin: Percent,
    // Liquidity / leverage / coverage
    pub liquidity: Multiple,
    pub debt_ratio: Percent,
    pub interest_coverage: Multiple,
    pub working_capital: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the ratio set for a single statement.
///
/// Total for every input: any ratio whose denominator is exactly zero is
/// reported as zero instead of failing, and sums beyond the Decimal range
/// saturate at MAX/MIN. Supplied totals are used as given.
pub fn compute_ratios(statement: &FinancialStatement) -> RatioSet {
    let is = &statement.income_statement;
    let bs = &statement.balance_sheet;

    let gross_profit = is.operating_income.saturating_sub(is.costs);
    let operating_profit =
        gross_profit.saturating_sub(is.admin_expenses.saturating_add(is.sales_expenses));
    let net_profit = operating_profit
        .saturating_add(is.non_operating_income)
        .saturating_sub(is.interest)
        .saturating_sub(is.non_operating_expenses)
        .saturating_sub(is.taxes);

    let gross_margin = percent_or_zero(gross_profit, is.operating_income);
    let operating_margin = percent_or_zero(operating_profit, is.operating_income);
    let net_margin = percent_or_zero(net_profit, is.operating_income);

    let short_term_assets = bs.short_term_assets();
    let short_term_obligations = bs.short_term_obligations();

    let liquidity = divide_or_zero(short_term_assets, short_term_obligations);
    let debt_ratio = percent_or_zero(bs.total_liabilities, bs.total_assets);
    let interest_coverage = divide_or_zero(operating_profit, is.interest);
    let working_capital = short_term_assets.saturating_sub(short_term_obligations);

    log::debug!(
        "ratios for '{}': net_profit={} liquidity={} debt_ratio={}",
        statement.period,
        net_profit,
        liquidity,
        debt_ratio
    );

    RatioSet {
        gross_profit,
        operating_profit,
        net_profit,
        gross_margin,
        operating_margin,
        net_margin,
        liquidity,
        debt_ratio,
        interest_coverage,
        working_capital,
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// `numerator / denominator`, or zero when the denominator is exactly zero.
///
/// Quotients beyond the Decimal range saturate at MAX/MIN.
pub(crate) fn divide_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// `numerator / denominator * 100`, or zero when the denominator is exactly zero.
pub(crate) fn percent_or_zero(numerator: Decimal, denominator: Decimal) -> Percent {
    divide_or_zero(numerator, denominator).saturating_mul(HUNDRED)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
