//! # EcoFinance
//!
//! Personal finance and carbon-footprint dashboard. A bank account is linked
//! through a token handshake with the backend, after which each panel loads
//! its own slice of data and shows it as money and emissions.
//!
//! ## Modules
//!
//! - [`api`]: Backend endpoints, wire types and the HTTP client
//! - [`session`]: Connection context shared by every panel
//! - [`resource`]: Remote resource lifecycle and the panel driver
//! - [`panels`]: Summary, insights, overview, carbon and transaction views
//! - [`footprint`]: Carbon share and label arithmetic
//! - [`link`]: Bank linking handshake
//! - [`chat`]: Assistant conversation
//! - [`dashboard`]: Page composition
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ecofinance::{Config, Dashboard, HttpFinanceClient, Notifications, Session};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let api = Arc::new(HttpFinanceClient::new(&config.api)?);
//!     let session = Arc::new(Session::new(config.session.client_id.clone()));
//!
//!     let dashboard = Dashboard::new(
//!         api,
//!         session,
//!         Arc::new(Notifications::new()),
//!         &config.dashboard,
//!     );
//!     dashboard.mount().await;
//!     println!("{}", dashboard.render().await);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod footprint;
pub mod link;
pub mod notify;
pub mod panels;
pub mod resource;
pub mod session;

#[cfg(test)]
mod testing;

// Re-export top-level types for convenience
pub use api::{
    AccountSummary, ApiError, ApiResult, CarbonCategory, ChatMessage, FinanceApi,
    HttpFinanceClient, ImpactLevel, Insight, OverviewPoint, Role, Transaction,
};

pub use config::{ApiConfig, Config, ConfigError, DashboardConfig, LoggingConfig, SessionConfig};

pub use chat::{ChatError, ChatSession};
pub use dashboard::Dashboard;
pub use link::{LinkFlow, LinkState, LinkStep, LinkWidget, WidgetError};
pub use notify::{Notification, NotificationLevel, Notifications};
pub use resource::{RemoteResource, Resource, ResourcePanel, ViewState};
pub use session::{Session, SessionScope};
