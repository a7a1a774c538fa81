//! Backend REST Client
//!
//! HTTP client for the EcoFinance backend.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::dto::{
    AccountSummary, CarbonCategory, ChatMessage, ChatRequest, ChatResponse,
    CreateLinkTokenRequest, CreateLinkTokenResponse, ExchangePublicTokenRequest, Insight,
    OverviewPoint, Transaction,
};
use super::error::{ApiError, ApiResult};
use super::FinanceApi;
use crate::config::ApiConfig;

/// reqwest-backed implementation of [`FinanceApi`]
pub struct HttpFinanceClient {
    client: Client,
    base_url: String,
}

impl HttpFinanceClient {
    /// Create a new client with the given configuration
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn scoped_url(&self, path: &str, client_id: &str) -> String {
        format!(
            "{}{}?client_id={}",
            self.base_url,
            path,
            urlencoding::encode(client_id)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::from_send)?;

        Self::decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> ApiResult<T> {
        tracing::debug!(url = %url, "POST");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_send)?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl FinanceApi for HttpFinanceClient {
    async fn create_link_token(&self, client_id: &str) -> ApiResult<String> {
        let url = format!("{}/api/create_link_token", self.base_url);
        let response: CreateLinkTokenResponse = self
            .post_json(&url, &CreateLinkTokenRequest { client_id })
            .await?;
        Ok(response.link_token)
    }

    async fn exchange_public_token(
        &self,
        public_token: &str,
        client_id: &str,
    ) -> ApiResult<serde_json::Value> {
        let url = format!("{}/api/exchange_public_token", self.base_url);
        self.post_json(
            &url,
            &ExchangePublicTokenRequest {
                public_token,
                client_id,
            },
        )
        .await
    }

    async fn fetch_transactions(&self, client_id: &str) -> ApiResult<Vec<Transaction>> {
        self.get_json(&self.scoped_url("/api/transactions", client_id))
            .await
    }

    async fn fetch_carbon_footprint(&self, client_id: &str) -> ApiResult<Vec<CarbonCategory>> {
        self.get_json(&self.scoped_url("/api/carbon_footprint", client_id))
            .await
    }

    async fn fetch_financial_overview(&self, client_id: &str) -> ApiResult<Vec<OverviewPoint>> {
        self.get_json(&self.scoped_url("/api/financial_overview", client_id))
            .await
    }

    async fn fetch_account_summary(&self, client_id: &str) -> ApiResult<Option<AccountSummary>> {
        self.get_json(&self.scoped_url("/api/account_summary", client_id))
            .await
    }

    async fn fetch_insights(&self) -> ApiResult<Vec<Insight>> {
        let url = format!("{}/api/ai-insights", self.base_url);
        self.get_json(&url).await
    }

    async fn send_chat(&self, message: &str, user_id: &str) -> ApiResult<Vec<ChatMessage>> {
        let url = format!("{}/api/chat", self.base_url);
        let response: ChatResponse = self
            .post_json(&url, &ChatRequest { message, user_id })
            .await?;
        Ok(response.conversation_history)
    }
}
