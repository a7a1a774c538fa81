//! AI Insight Cards
//!
//! Savings recommendations, each with a category glyph and its money and
//! CO2 badges.

use async_trait::async_trait;

use super::PanelRender;
use crate::api::{ApiResult, FinanceApi, Insight};
use crate::resource::Resource;
use crate::session::SessionScope;

#[derive(Debug, Default)]
pub struct AiInsights;

#[async_trait]
impl Resource for AiInsights {
    type Data = Vec<Insight>;

    fn name(&self) -> &'static str {
        "ai_insights"
    }

    fn failure_message(&self) -> &'static str {
        "Failed to load AI insights"
    }

    // Insights are not scoped by client id on the backend
    async fn fetch(&self, api: &dyn FinanceApi, _scope: &SessionScope) -> ApiResult<Self::Data> {
        api.fetch_insights().await
    }
}

/// Glyph for an insight category, matched case-insensitively
pub fn insight_glyph(category: &str) -> &'static str {
    match category.to_lowercase().as_str() {
        "transportation" => "🚗",
        "travel" => "✈",
        "food and drinks" => "🍴",
        "general merchandise" => "🛍",
        "home improvement" => "🔧",
        "rent and utilities" => "🏠",
        "general services" => "💼",
        _ => "💡",
    }
}

fn insight_card(insight: &Insight) -> String {
    let mut badges = Vec::with_capacity(2);
    if let Some(savings) = &insight.savings_amount {
        badges.push(format!("[Save {}]", savings));
    }
    badges.push(format!("[Reduce CO₂ by {}]", insight.carbon_reduction));

    format!(
        "  {} {}\n    {}\n    {}",
        insight_glyph(&insight.category),
        insight.title,
        insight.description,
        badges.join(" ")
    )
}

impl PanelRender for AiInsights {
    fn render_disconnected(&self) -> String {
        "  No Insights Available\n  Link a bank account to unlock AI-generated recommendations."
            .to_string()
    }

    fn render_loading(&self) -> String {
        "  Generating AI insights...".to_string()
    }

    fn render_empty(&self) -> String {
        "  Connect your bank account to get personalized insights.".to_string()
    }

    fn render_loaded(&self, data: &Self::Data) -> String {
        data.iter().map(insight_card).collect::<Vec<_>>().join("\n\n")
    }
}
