use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

// ---------------------------------------------------------------------------
// Statement model
// ---------------------------------------------------------------------------

/// One reporting period's financial statement.
///
/// Every numeric field defaults to zero when absent from the input, so the
/// ratio engine can assume a fully populated statement. Both snake_case and
/// the camelCase keys emitted by web forms are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatement {
    pub period: String,
    #[serde(default, alias = "incomeStatement")]
    pub income_statement: IncomeStatement,
    #[serde(default, alias = "balanceSheet")]
    pub balance_sheet: BalanceSheet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeStatement {
    #[serde(alias = "operatingIncome")]
    pub operating_income: Money,
    #[serde(alias = "nonOperatingIncome")]
    pub non_operating_income: Money,
    pub costs: Money,
    #[serde(alias = "adminExpenses")]
    pub admin_expenses: Money,
    #[serde(alias = "salesExpenses")]
    pub sales_expenses: Money,
    pub interest: Money,
    #[serde(alias = "nonOperatingExpenses")]
    pub non_operating_expenses: Money,
    pub taxes: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceSheet {
    #[serde(alias = "currentAssets")]
    pub current_assets: Money,
    #[serde(alias = "nonCurrentAssets")]
    pub non_current_assets: Money,
    #[serde(alias = "accountsReceivable")]
    pub accounts_receivable: Money,
    #[serde(alias = "totalAssets")]
    pub total_assets: Money,
    #[serde(alias = "currentLiabilities")]
    pub current_liabilities: Money,
    #[serde(alias = "nonCurrentLiabilities")]
    pub non_current_liabilities: Money,
    #[serde(alias = "accountsPayable")]
    pub accounts_payable: Money,
    #[serde(alias = "totalLiabilities")]
    pub total_liabilities: Money,
    pub equity: Money,
}

impl FinancialStatement {
    pub fn new(
        period: impl Into<String>,
        income_statement: IncomeStatement,
        balance_sheet: BalanceSheet,
    ) -> Self {
        Self {
            period: period.into(),
            income_statement,
            balance_sheet,
        }
    }
}

impl BalanceSheet {
    /// Current assets plus receivables.
    pub fn short_term_assets(&self) -> Money {
        self.current_assets.saturating_add(self.accounts_receivable)
    }

    /// Current liabilities plus payables.
    pub fn short_term_obligations(&self) -> Money {
        self.current_liabilities.saturating_add(self.accounts_payable)
    }

    /// Sum of the asset components, as the entry form computes it.
    pub fn component_assets(&self) -> Money {
        self.current_assets
            .saturating_add(self.non_current_assets)
            .saturating_add(self.accounts_receivable)
    }

    /// Sum of the liability components, as the entry form computes it.
    pub fn component_liabilities(&self) -> Money {
        self.current_liabilities
            .saturating_add(self.non_current_liabilities)
            .saturating_add(self.accounts_payable)
    }

    /// Returns a copy whose totals are recomputed from their components.
    ///
    /// The ratio engine never calls this; it trusts the supplied totals.
    pub fn with_derived_totals(&self) -> Self {
        Self {
            total_assets: self.component_assets(),
            total_liabilities: self.component_liabilities(),
            ..self.clone()
        }
    }

    /// Whether the supplied totals equal the sums of their components.
    pub fn totals_consistent(&self) -> bool {
        self.total_assets == self.component_assets()
            && self.total_liabilities == self.component_liabilities()
    }

    /// True when every field is zero, i.e. the period was left blank.
    pub fn is_blank(&self) -> bool {
        [
            self.current_assets,
            self.non_current_assets,
            self.accounts_receivable,
            self.total_assets,
            self.current_liabilities,
            self.non_current_liabilities,
            self.accounts_payable,
            self.total_liabilities,
            self.equity,
        ]
        .iter()
        .all(Decimal::is_zero)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
