//! Account Summary Cards
//!
//! Total balance, monthly spending and carbon footprint, each with its
//! change from last month.

use async_trait::async_trait;

use super::{skeleton_bar, PanelRender};
use crate::api::{AccountSummary, ApiResult, FinanceApi};
use crate::resource::Resource;
use crate::session::SessionScope;

const CARD_TITLES: [&str; 3] = ["Total Balance", "Monthly Spending", "Carbon Footprint"];

/// The three summary cards at the top of the dashboard
#[derive(Debug, Default)]
pub struct AccountSummaryCards;

#[async_trait]
impl Resource for AccountSummaryCards {
    type Data = Option<AccountSummary>;

    fn name(&self) -> &'static str {
        "account_summary"
    }

    fn failure_message(&self) -> &'static str {
        "Failed to load account summary data"
    }

    async fn fetch(&self, api: &dyn FinanceApi, scope: &SessionScope) -> ApiResult<Self::Data> {
        api.fetch_account_summary(&scope.client_id).await
    }
}

fn card(title: &str, value: &str, caption: &str) -> String {
    format!("  {}\n    {}\n    {}", title, value, caption)
}

impl PanelRender for AccountSummaryCards {
    fn render_disconnected(&self) -> String {
        CARD_TITLES
            .iter()
            .map(|title| card(title, "Connect Bank", "No data available"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_loading(&self) -> String {
        CARD_TITLES
            .iter()
            .map(|_| format!("  {}\n    {}\n    {}", skeleton_bar(16), skeleton_bar(12), skeleton_bar(16)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_empty(&self) -> String {
        [
            card(CARD_TITLES[0], "$0.00", "No data available"),
            card(CARD_TITLES[1], "$0.00", "No data available"),
            card(CARD_TITLES[2], "0 tons CO₂", "No data available"),
        ]
        .join("\n")
    }

    fn render_loaded(&self, data: &Self::Data) -> String {
        let Some(summary) = data else {
            return self.render_empty();
        };

        [
            card(
                CARD_TITLES[0],
                &summary.total_balance,
                &format!("{} from last month", summary.balance_change),
            ),
            card(
                CARD_TITLES[1],
                &summary.monthly_spending,
                &format!("↘ {} from last month", summary.spending_change),
            ),
            card(
                CARD_TITLES[2],
                &summary.carbon_footprint,
                &format!("↘ {} from last month", summary.carbon_change),
            ),
        ]
        .join("\n")
    }
}
