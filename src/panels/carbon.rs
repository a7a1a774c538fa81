//! Carbon Footprint Panel
//!
//! Emissions by spending category, drawn as a legend with proportional bars.

use async_trait::async_trait;

use super::{scaled_bar, skeleton_bar, PanelRender};
use crate::api::{ApiResult, CarbonCategory, FinanceApi};
use crate::footprint;
use crate::resource::Resource;
use crate::session::SessionScope;

const BAR_WIDTH: usize = 24;

#[derive(Debug, Default)]
pub struct CarbonFootprint;

#[async_trait]
impl Resource for CarbonFootprint {
    type Data = Vec<CarbonCategory>;

    fn name(&self) -> &'static str {
        "carbon_footprint"
    }

    fn failure_message(&self) -> &'static str {
        "Failed to load carbon footprint data"
    }

    async fn fetch(&self, api: &dyn FinanceApi, scope: &SessionScope) -> ApiResult<Self::Data> {
        api.fetch_carbon_footprint(&scope.client_id).await
    }
}

impl PanelRender for CarbonFootprint {
    fn render_disconnected(&self) -> String {
        "  No Carbon Data Available\n  Connect your bank account to see your carbon footprint analysis."
            .to_string()
    }

    fn render_loading(&self) -> String {
        let ring = skeleton_bar(12);
        format!("      {ring}\n    {ring}{ring}\n      {ring}")
    }

    fn render_empty(&self) -> String {
        "  No carbon footprint data available yet.".to_string()
    }

    fn render_loaded(&self, data: &Self::Data) -> String {
        let Some(breakdown) = footprint::breakdown(data) else {
            return self.render_empty();
        };

        let mut lines: Vec<String> = breakdown
            .slices
            .iter()
            .map(|slice| {
                format!(
                    "  {:<width$} {:<20} {} tons CO₂",
                    scaled_bar(slice.share, 1.0, BAR_WIDTH),
                    slice.label.as_deref().unwrap_or(""),
                    slice.category.value,
                    width = BAR_WIDTH
                )
            })
            .collect();

        lines.push(format!("  Total: {:.1} tons CO₂", breakdown.total));
        lines.join("\n")
    }
}
