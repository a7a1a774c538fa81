//! Dashboard Shell
//!
//! Composes the panels into the dashboard page and keeps them in step with
//! the session.

use chrono::{DateTime, Local, Utc};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::api::FinanceApi;
use crate::config::DashboardConfig;
use crate::link::LinkFlow;
use crate::notify::Notifications;
use crate::panels::{
    AccountSummaryCards, AiInsights, CarbonFootprint, FinancialOverview, TransactionList,
};
use crate::resource::ResourcePanel;
use crate::session::{Session, SessionScope};

/// The dashboard page
pub struct Dashboard {
    session: Arc<Session>,
    api: Arc<dyn FinanceApi>,
    notifications: Arc<Notifications>,
    pub summary: ResourcePanel<AccountSummaryCards>,
    pub insights: ResourcePanel<AiInsights>,
    pub overview: ResourcePanel<FinancialOverview>,
    pub carbon: ResourcePanel<CarbonFootprint>,
    pub transactions: ResourcePanel<TransactionList>,
    pub link: LinkFlow,
}

impl Dashboard {
    pub fn new(
        api: Arc<dyn FinanceApi>,
        session: Arc<Session>,
        notifications: Arc<Notifications>,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            summary: ResourcePanel::new(AccountSummaryCards, api.clone(), session.clone()),
            insights: ResourcePanel::new(AiInsights, api.clone(), session.clone()),
            overview: ResourcePanel::new(FinancialOverview, api.clone(), session.clone()),
            carbon: ResourcePanel::new(CarbonFootprint, api.clone(), session.clone()),
            transactions: ResourcePanel::new(
                TransactionList::recent(config.recent_transactions),
                api.clone(),
                session.clone(),
            ),
            link: LinkFlow::new(api.clone(), session.clone(), notifications.clone()),
            session,
            api,
            notifications,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn api(&self) -> &Arc<dyn FinanceApi> {
        &self.api
    }

    pub fn notifications(&self) -> &Arc<Notifications> {
        &self.notifications
    }

    /// Probe the connection once, then load every panel
    pub async fn mount(&self) {
        let connected = self.session.probe_connection(self.api.as_ref()).await;
        tracing::info!(
            client_id = %self.session.client_id(),
            connected,
            "Dashboard mounted"
        );
        self.on_scope_change(&self.session.scope()).await;
    }

    /// Re-fetch every panel with the current scope
    pub async fn refresh_all(&self) {
        tokio::join!(
            self.summary.refresh(),
            self.insights.refresh(),
            self.overview.refresh(),
            self.carbon.refresh(),
            self.transactions.refresh(),
        );
    }

    /// Give every panel the chance to react to a session change
    pub async fn on_scope_change(&self, scope: &SessionScope) {
        tokio::join!(
            self.summary.on_scope_change(scope),
            self.insights.on_scope_change(scope),
            self.overview.on_scope_change(scope),
            self.carbon.on_scope_change(scope),
            self.transactions.on_scope_change(scope),
        );
    }

    /// Follow session changes in the background until the session is dropped
    pub fn spawn_scope_watcher(self: &Arc<Self>) -> JoinHandle<()> {
        let dashboard = Arc::clone(self);
        let mut rx = self.session.subscribe();

        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let scope = rx.borrow_and_update().clone();
                tracing::debug!(
                    connected = scope.connected,
                    client_id = %scope.client_id,
                    "Session changed"
                );
                dashboard.on_scope_change(&scope).await;
            }
        })
    }

    /// End every panel's lifetime; responses still in flight are abandoned
    pub async fn unmount(&self) {
        tokio::join!(
            self.summary.close(),
            self.insights.close(),
            self.overview.close(),
            self.carbon.close(),
            self.transactions.close(),
        );
    }

    /// Most recent time any panel received data
    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        let (a, b, c, d, e) = tokio::join!(
            self.summary.slot().updated_at(),
            self.insights.slot().updated_at(),
            self.overview.slot().updated_at(),
            self.carbon.slot().updated_at(),
            self.transactions.slot().updated_at(),
        );
        [a, b, c, d, e].into_iter().flatten().max()
    }

    /// Full page as terminal text
    pub async fn render(&self) -> String {
        let (summary, insights, overview, carbon, transactions) = tokio::join!(
            self.summary.render(),
            self.insights.render(),
            self.overview.render(),
            self.carbon.render(),
            self.transactions.render(),
        );

        let header = format!(
            "Finance & Carbon Footprint Dashboard{:>30}",
            format!("[{}]", self.link.button_label().await)
        );

        let sections = [
            section("Account Summary", None, &summary),
            section(
                "AI-Generated Insights",
                Some("Personalized recommendations to improve your finances and reduce your carbon footprint"),
                &insights,
            ),
            section(
                "Financial Overview",
                Some("View your spending and saving patterns over time"),
                &overview,
            ),
            section(
                "Carbon Footprint",
                Some("Your monthly carbon emissions by category"),
                &carbon,
            ),
            section(
                "Recent Transactions",
                Some("Your recent financial activities and their carbon impact"),
                &transactions,
            ),
        ];

        format!(
            "{}\n{}\n{}\n{}",
            header,
            "═".repeat(66),
            sections.join("\n"),
            self.footer().await
        )
    }

    async fn footer(&self) -> String {
        let status = if self.session.is_connected() {
            "● Connected"
        } else {
            "○ Not connected"
        };
        let synced = self
            .last_updated()
            .await
            .map(|ts| {
                format!(
                    "Last updated: {}",
                    ts.with_timezone(&Local).format("%H:%M:%S")
                )
            })
            .unwrap_or_else(|| "Not synced".to_string());

        format!("{}\n{}    {}", "─".repeat(66), status, synced)
    }
}

fn section(title: &str, description: Option<&str>, body: &str) -> String {
    match description {
        Some(description) => format!("\n▌ {}\n  {}\n\n{}\n", title, description, body),
        None => format!("\n▌ {}\n\n{}\n", title, body),
    }
}
