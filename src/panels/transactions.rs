//! Transaction List
//!
//! Recent transactions on the dashboard, or the full history on the
//! transactions page, each with its carbon estimate and impact badge.

use async_trait::async_trait;

use super::{skeleton_bar, PanelRender};
use crate::api::{ApiResult, FinanceApi, Transaction};
use crate::resource::Resource;
use crate::session::SessionScope;

/// Transaction list, optionally capped to the most recent entries
#[derive(Debug, Default)]
pub struct TransactionList {
    limit: Option<usize>,
}

impl TransactionList {
    /// Full history
    pub fn all() -> Self {
        Self { limit: None }
    }

    /// Only the first `limit` transactions, as returned by the backend
    pub fn recent(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }

    fn skeleton_rows(&self) -> usize {
        self.limit.unwrap_or(5).min(5)
    }
}

#[async_trait]
impl Resource for TransactionList {
    type Data = Vec<Transaction>;

    fn name(&self) -> &'static str {
        "transactions"
    }

    fn failure_message(&self) -> &'static str {
        "Failed to load transactions. Please try again later."
    }

    async fn fetch(&self, api: &dyn FinanceApi, scope: &SessionScope) -> ApiResult<Self::Data> {
        api.fetch_transactions(&scope.client_id).await
    }
}

/// Glyph for a backend category code
pub fn category_glyph(category: &str) -> &'static str {
    match category {
        "FOOD_AND_DRINK" => "🍴",
        "TRANSPORTATION" => "🚗",
        "GENERAL_MERCHANDISE" => "🛍",
        "RENT_AND_UTILITIES" => "🏠",
        "GENERAL_SERVICES" => "💼",
        "TRAVEL" => "✈",
        _ => "💳",
    }
}

fn transaction_row(tx: &Transaction) -> String {
    format!(
        "  {} {:<28} {:>10}\n     {:<28} {:>10} [{}]",
        category_glyph(&tx.category),
        tx.name,
        tx.amount,
        tx.date,
        tx.carbon_estimate,
        tx.impact_level.as_str()
    )
}

impl PanelRender for TransactionList {
    fn render_disconnected(&self) -> String {
        "  No Bank Account Connected\n  Connect your bank account to see your transaction history and carbon impact."
            .to_string()
    }

    fn render_loading(&self) -> String {
        (0..self.skeleton_rows())
            .map(|_| format!("  {} {}\n     {}", skeleton_bar(2), skeleton_bar(20), skeleton_bar(14)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_empty(&self) -> String {
        "  No transactions found. Recent transactions will appear here.".to_string()
    }

    fn render_loaded(&self, data: &Self::Data) -> String {
        let shown = self.limit.unwrap_or(data.len());
        data.iter()
            .take(shown)
            .map(transaction_row)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
