//! Dashboard Panels
//!
//! One [`Resource`](crate::resource::Resource) per dashboard widget, each
//! rendered to terminal text through [`PanelRender`].

pub mod carbon;
pub mod insights;
pub mod overview;
pub mod summary;
pub mod transactions;

pub use carbon::CarbonFootprint;
pub use insights::AiInsights;
pub use overview::FinancialOverview;
pub use summary::AccountSummaryCards;
pub use transactions::TransactionList;

use crate::resource::{Resource, ResourcePanel, ViewState};

/// Text rendering of each view state of a panel
pub trait PanelRender: Resource {
    /// Call to action shown before an account is linked
    fn render_disconnected(&self) -> String;

    /// Placeholder sized like the loaded content
    fn render_loading(&self) -> String;

    fn render_error(&self, message: &str) -> String {
        format!("  {}\n  [Retry]", message)
    }

    fn render_empty(&self) -> String;

    fn render_loaded(&self, data: &Self::Data) -> String;
}

impl<R: PanelRender> ResourcePanel<R> {
    /// Render whichever of the four views is active
    pub async fn render(&self) -> String {
        let resource = self.resource();
        self.with_view(|view| match view {
            ViewState::Disconnected => resource.render_disconnected(),
            ViewState::Loading => resource.render_loading(),
            ViewState::Error(message) => resource.render_error(message),
            ViewState::Empty => resource.render_empty(),
            ViewState::Loaded(data) => resource.render_loaded(data),
        })
        .await
    }
}

/// Shimmer block used by skeletons
pub(crate) fn skeleton_bar(width: usize) -> String {
    "░".repeat(width)
}

/// Horizontal bar scaled to `max`
pub(crate) fn scaled_bar(value: f64, max: f64, width: usize) -> String {
    if !(max > 0.0 && value > 0.0) {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    "█".repeat(filled.clamp(1, width))
}
