//! Financial Overview
//!
//! Monthly spending, saving and income as grouped horizontal bars.

use async_trait::async_trait;

use super::{scaled_bar, skeleton_bar, PanelRender};
use crate::api::{ApiResult, FinanceApi, OverviewPoint};
use crate::resource::Resource;
use crate::session::SessionScope;

const BAR_WIDTH: usize = 30;

#[derive(Debug, Default)]
pub struct FinancialOverview;

#[async_trait]
impl Resource for FinancialOverview {
    type Data = Vec<OverviewPoint>;

    fn name(&self) -> &'static str {
        "financial_overview"
    }

    fn failure_message(&self) -> &'static str {
        "Failed to load financial overview data"
    }

    async fn fetch(&self, api: &dyn FinanceApi, scope: &SessionScope) -> ApiResult<Self::Data> {
        api.fetch_financial_overview(&scope.client_id).await
    }
}

impl PanelRender for FinancialOverview {
    fn render_disconnected(&self) -> String {
        "  No Financial Data Available\n  Connect your bank account to see your financial overview."
            .to_string()
    }

    fn render_loading(&self) -> String {
        (0..6)
            .map(|i| format!("  {}", skeleton_bar(BAR_WIDTH - i * 3)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_empty(&self) -> String {
        "  No financial overview data available yet.".to_string()
    }

    fn render_loaded(&self, data: &Self::Data) -> String {
        let max = data
            .iter()
            .flat_map(|p| [p.spending, p.saving, p.income])
            .fold(0.0_f64, f64::max);

        let mut lines = Vec::with_capacity(data.len() * 3);
        for point in data {
            for (label, value) in [
                ("Spending", point.spending),
                ("Saving", point.saving),
                ("Income", point.income),
            ] {
                let month = if label == "Spending" { point.name.as_str() } else { "" };
                lines.push(format!(
                    "  {:<4} {:<8} {:<width$} ${:.2}",
                    month,
                    label,
                    scaled_bar(value, max, BAR_WIDTH),
                    value,
                    width = BAR_WIDTH
                ));
            }
        }
        lines.join("\n")
    }
}
