//! Test doubles shared by the module tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::api::{
    AccountSummary, ApiError, ApiResult, CarbonCategory, ChatMessage, FinanceApi, ImpactLevel,
    Insight, OverviewPoint, Transaction,
};

/// Number of calls made to each endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub link_token: usize,
    pub exchange: usize,
    pub transactions: usize,
    pub carbon: usize,
    pub overview: usize,
    pub summary: usize,
    pub insights: usize,
    pub chat: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.link_token
            + self.exchange
            + self.transactions
            + self.carbon
            + self.overview
            + self.summary
            + self.insights
            + self.chat
    }
}

struct MockState {
    link_token: Result<String, u16>,
    exchange: Result<serde_json::Value, u16>,
    transactions: Result<Vec<Transaction>, u16>,
    carbon: Result<Vec<CarbonCategory>, u16>,
    overview: Result<Vec<OverviewPoint>, u16>,
    summary: Result<Option<AccountSummary>, u16>,
    insights: Result<Vec<Insight>, u16>,
    chat: Result<Vec<ChatMessage>, u16>,
    calls: CallCounts,
    client_ids: Vec<String>,
    chat_requests: Vec<(String, String)>,
    exchanged_tokens: Vec<String>,
}

/// Spy implementation of [`FinanceApi`] with scripted responses
pub struct MockApi {
    state: Mutex<MockState>,
}

fn scripted<T: Clone>(result: &Result<T, u16>) -> ApiResult<T> {
    result.clone().map_err(|status| ApiError::Status {
        status,
        body: "scripted failure".to_string(),
    })
}

impl MockApi {
    /// Every endpoint succeeds with empty data
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                link_token: Ok("link-sandbox-token".to_string()),
                exchange: Ok(serde_json::json!({ "item_id": "item-1" })),
                transactions: Ok(Vec::new()),
                carbon: Ok(Vec::new()),
                overview: Ok(Vec::new()),
                summary: Ok(None),
                insights: Ok(Vec::new()),
                chat: Ok(Vec::new()),
                calls: CallCounts::default(),
                client_ids: Vec::new(),
                chat_requests: Vec::new(),
                exchanged_tokens: Vec::new(),
            }),
        }
    }

    pub fn calls(&self) -> CallCounts {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn client_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().client_ids.clone()
    }

    pub fn last_client_id(&self) -> Option<String> {
        self.state.lock().unwrap().client_ids.last().cloned()
    }

    pub fn chat_requests(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().chat_requests.clone()
    }

    pub fn exchanged_tokens(&self) -> Vec<String> {
        self.state.lock().unwrap().exchanged_tokens.clone()
    }

    pub fn set_transactions(&self, result: Result<Vec<Transaction>, u16>) {
        self.state.lock().unwrap().transactions = result;
    }

    pub fn fail_transactions(&self) {
        self.set_transactions(Err(500));
    }

    pub fn set_carbon(&self, result: Result<Vec<CarbonCategory>, u16>) {
        self.state.lock().unwrap().carbon = result;
    }

    pub fn set_overview(&self, result: Result<Vec<OverviewPoint>, u16>) {
        self.state.lock().unwrap().overview = result;
    }

    pub fn set_summary(&self, result: Result<Option<AccountSummary>, u16>) {
        self.state.lock().unwrap().summary = result;
    }

    pub fn set_insights(&self, result: Result<Vec<Insight>, u16>) {
        self.state.lock().unwrap().insights = result;
    }

    pub fn set_chat(&self, result: Result<Vec<ChatMessage>, u16>) {
        self.state.lock().unwrap().chat = result;
    }

    pub fn set_link_token(&self, result: Result<String, u16>) {
        self.state.lock().unwrap().link_token = result;
    }

    pub fn set_exchange(&self, result: Result<serde_json::Value, u16>) {
        self.state.lock().unwrap().exchange = result;
    }
}

#[async_trait]
impl FinanceApi for MockApi {
    async fn create_link_token(&self, client_id: &str) -> ApiResult<String> {
        let mut state = self.state.lock().unwrap();
        state.calls.link_token += 1;
        state.client_ids.push(client_id.to_string());
        scripted(&state.link_token)
    }

    async fn exchange_public_token(
        &self,
        public_token: &str,
        client_id: &str,
    ) -> ApiResult<serde_json::Value> {
        let mut state = self.state.lock().unwrap();
        state.calls.exchange += 1;
        state.client_ids.push(client_id.to_string());
        state.exchanged_tokens.push(public_token.to_string());
        scripted(&state.exchange)
    }

    async fn fetch_transactions(&self, client_id: &str) -> ApiResult<Vec<Transaction>> {
        let mut state = self.state.lock().unwrap();
        state.calls.transactions += 1;
        state.client_ids.push(client_id.to_string());
        scripted(&state.transactions)
    }

    async fn fetch_carbon_footprint(&self, client_id: &str) -> ApiResult<Vec<CarbonCategory>> {
        let mut state = self.state.lock().unwrap();
        state.calls.carbon += 1;
        state.client_ids.push(client_id.to_string());
        scripted(&state.carbon)
    }

    async fn fetch_financial_overview(&self, client_id: &str) -> ApiResult<Vec<OverviewPoint>> {
        let mut state = self.state.lock().unwrap();
        state.calls.overview += 1;
        state.client_ids.push(client_id.to_string());
        scripted(&state.overview)
    }

    async fn fetch_account_summary(&self, client_id: &str) -> ApiResult<Option<AccountSummary>> {
        let mut state = self.state.lock().unwrap();
        state.calls.summary += 1;
        state.client_ids.push(client_id.to_string());
        scripted(&state.summary)
    }

    async fn fetch_insights(&self) -> ApiResult<Vec<Insight>> {
        let mut state = self.state.lock().unwrap();
        state.calls.insights += 1;
        scripted(&state.insights)
    }

    async fn send_chat(&self, message: &str, user_id: &str) -> ApiResult<Vec<ChatMessage>> {
        let mut state = self.state.lock().unwrap();
        state.calls.chat += 1;
        state
            .chat_requests
            .push((message.to_string(), user_id.to_string()));
        scripted(&state.chat)
    }
}

pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "tx-1".to_string(),
            name: "Green Grocer".to_string(),
            amount: "$42.10".to_string(),
            date: "Mar 04, 2025".to_string(),
            category: "FOOD_AND_DRINK".to_string(),
            carbon_estimate: "8.4 kg".to_string(),
            impact_level: ImpactLevel::Medium,
        },
        Transaction {
            id: "tx-2".to_string(),
            name: "City Metro".to_string(),
            amount: "$2.75".to_string(),
            date: "Mar 03, 2025".to_string(),
            category: "TRANSPORTATION".to_string(),
            carbon_estimate: "0.8 kg".to_string(),
            impact_level: ImpactLevel::High,
        },
    ]
}

pub fn sample_carbon() -> Vec<CarbonCategory> {
    vec![
        CarbonCategory {
            name: "Transportation".to_string(),
            value: 95.0,
            color_tag: "#ef4444".to_string(),
        },
        CarbonCategory {
            name: "Food And Drink".to_string(),
            value: 5.0,
            color_tag: "#f97316".to_string(),
        },
    ]
}

pub fn sample_summary() -> AccountSummary {
    AccountSummary {
        total_balance: "$12,480.00".to_string(),
        monthly_spending: "$1,920.35".to_string(),
        carbon_footprint: "0.4 tons CO2".to_string(),
        balance_change: "+2.4%".to_string(),
        spending_change: "-3.1%".to_string(),
        carbon_change: "-11.2%".to_string(),
    }
}

pub fn sample_overview() -> Vec<OverviewPoint> {
    vec![
        OverviewPoint {
            name: "Jan".to_string(),
            spending: 1800.0,
            saving: 400.0,
            income: 2200.0,
        },
        OverviewPoint {
            name: "Feb".to_string(),
            spending: 1500.0,
            saving: 700.0,
            income: 2200.0,
        },
    ]
}

pub fn sample_insights() -> Vec<Insight> {
    vec![
        Insight {
            title: "Take the train".to_string(),
            description: "Swap two rideshares a week for transit.".to_string(),
            savings_amount: Some("$45/month".to_string()),
            carbon_reduction: "15 kg".to_string(),
            category: "Transportation".to_string(),
        },
        Insight {
            title: "Buy seasonal".to_string(),
            description: "Local produce travels less.".to_string(),
            savings_amount: None,
            carbon_reduction: "4 kg".to_string(),
            category: "Food and Drinks".to_string(),
        },
    ]
}
