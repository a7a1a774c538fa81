//! Data Transfer Objects
//!
//! Request and response types for the backend endpoints.
//! Field names follow the backend's JSON, which mixes snake_case and
//! camelCase depending on the endpoint.

use serde::{Deserialize, Serialize};

// ============================================
// LINKING DTOs
// ============================================

#[derive(Debug, Serialize)]
pub(crate) struct CreateLinkTokenRequest<'a> {
    pub client_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateLinkTokenResponse {
    pub link_token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExchangePublicTokenRequest<'a> {
    pub public_token: &'a str,
    pub client_id: &'a str,
}

// ============================================
// RESOURCE DTOs
// ============================================

/// Carbon impact of a transaction's category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "low",
            ImpactLevel::Medium => "medium",
            ImpactLevel::High => "high",
        }
    }
}

/// A single bank transaction with its carbon estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub name: String,
    /// Preformatted amount, e.g. `$12.40`
    pub amount: String,
    /// Preformatted date, e.g. `Mar 04, 2025`
    pub date: String,
    /// Category code, e.g. `FOOD_AND_DRINK`
    pub category: String,
    /// Preformatted estimate, e.g. `2.5 kg`
    #[serde(rename = "carbon")]
    pub carbon_estimate: String,
    #[serde(rename = "impact")]
    pub impact_level: ImpactLevel,
}

/// One slice of the carbon footprint pie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonCategory {
    pub name: String,
    /// Tons of CO2
    pub value: f64,
    /// Hex color tag, e.g. `#ef4444`
    #[serde(rename = "color", default)]
    pub color_tag: String,
}

/// One month of the financial overview bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewPoint {
    pub name: String,
    #[serde(rename = "Spending")]
    pub spending: f64,
    #[serde(rename = "Saving")]
    pub saving: f64,
    #[serde(rename = "Income")]
    pub income: f64,
}

/// Headline figures for the summary cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub total_balance: String,
    pub monthly_spending: String,
    pub carbon_footprint: String,
    pub balance_change: String,
    pub spending_change: String,
    pub carbon_change: String,
}

/// AI-generated savings recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub savings_amount: Option<String>,
    pub carbon_reduction: String,
    #[serde(default)]
    pub category: String,
}

// ============================================
// CHAT DTOs
// ============================================

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the chat transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
    pub user_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
}
