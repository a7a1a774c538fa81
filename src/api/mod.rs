//! Backend API
//!
//! Data-fetching functions for every dashboard resource, expressed as the
//! [`FinanceApi`] trait so panels can be driven by the HTTP client or by a
//! test double.
//!
//! ## Endpoints
//!
//! - `POST /api/create_link_token` - Start the bank-linking handshake
//! - `POST /api/exchange_public_token` - Finish the handshake
//! - `GET  /api/transactions?client_id=` - Transaction history
//! - `GET  /api/carbon_footprint?client_id=` - Carbon footprint by category
//! - `GET  /api/financial_overview?client_id=` - Monthly spending/saving/income
//! - `GET  /api/account_summary?client_id=` - Summary card figures
//! - `GET  /api/ai-insights` - Savings recommendations
//! - `POST /api/chat` - Assistant conversation turn

mod client;
mod dto;
mod error;

pub use client::HttpFinanceClient;
pub use dto::{
    AccountSummary, CarbonCategory, ChatMessage, ImpactLevel, Insight, OverviewPoint, Role,
    Transaction,
};
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

/// Every backend call the dashboard makes
#[async_trait]
pub trait FinanceApi: Send + Sync {
    /// Request a short-lived link token for the bank-linking widget
    async fn create_link_token(&self, client_id: &str) -> ApiResult<String>;

    /// Exchange the widget's public token for a durable access credential
    async fn exchange_public_token(
        &self,
        public_token: &str,
        client_id: &str,
    ) -> ApiResult<serde_json::Value>;

    async fn fetch_transactions(&self, client_id: &str) -> ApiResult<Vec<Transaction>>;

    async fn fetch_carbon_footprint(&self, client_id: &str) -> ApiResult<Vec<CarbonCategory>>;

    async fn fetch_financial_overview(&self, client_id: &str) -> ApiResult<Vec<OverviewPoint>>;

    /// `None` when the backend has no summary yet
    async fn fetch_account_summary(&self, client_id: &str) -> ApiResult<Option<AccountSummary>>;

    async fn fetch_insights(&self) -> ApiResult<Vec<Insight>>;

    /// Send one chat turn; returns the canonical conversation history
    async fn send_chat(&self, message: &str, user_id: &str) -> ApiResult<Vec<ChatMessage>>;
}
