//! Bank Linking
//!
//! The three-step handshake with the bank-data provider:
//!
//! 1. Request a short-lived link token for the client identifier
//! 2. The provider's widget runs the user consent flow and yields a public token
//! 3. Exchange the public token server-side for a durable access credential
//!
//! A successful exchange latches the session to connected.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::api::FinanceApi;
use crate::notify::Notifications;
use crate::session::Session;

/// Where the handshake stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    NoToken,
    TokenRequested,
    TokenReady { link_token: String },
    Linking { link_token: String },
    Linked,
}

/// Result of one press of the connect button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStep {
    /// A link token was obtained; the next press opens the widget
    TokenReady,
    /// The token request failed; back to `NoToken`
    TokenFailed,
    /// The user left the widget without finishing
    Exited,
    /// The widget itself failed; the token is kept for another attempt
    WidgetFailed,
    /// The exchange failed; back to `TokenReady`
    ExchangeFailed,
    Linked,
    /// A request is in flight, the button is disabled
    Busy,
    AlreadyLinked,
}

/// Errors raised by a link widget
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Link widget failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The provider's consent widget
#[async_trait]
pub trait LinkWidget: Send + Sync {
    /// Run the consent flow for `link_token`.
    ///
    /// Returns the public token, or `None` when the user exits.
    async fn open(&self, link_token: &str) -> Result<Option<String>, WidgetError>;
}

/// State machine behind the connect button
pub struct LinkFlow {
    api: Arc<dyn FinanceApi>,
    session: Arc<Session>,
    notifications: Arc<Notifications>,
    state: Mutex<LinkState>,
}

impl LinkFlow {
    pub fn new(
        api: Arc<dyn FinanceApi>,
        session: Arc<Session>,
        notifications: Arc<Notifications>,
    ) -> Self {
        Self {
            api,
            session,
            notifications,
            state: Mutex::new(LinkState::NoToken),
        }
    }

    pub async fn state(&self) -> LinkState {
        self.state.lock().await.clone()
    }

    pub async fn button_label(&self) -> &'static str {
        match *self.state.lock().await {
            LinkState::TokenRequested | LinkState::Linking { .. } => "Loading...",
            LinkState::Linked => "Connected",
            LinkState::NoToken | LinkState::TokenReady { .. } => "Connect Bank Account",
        }
    }

    pub async fn is_enabled(&self) -> bool {
        matches!(
            *self.state.lock().await,
            LinkState::NoToken | LinkState::TokenReady { .. }
        )
    }

    /// Press the connect button.
    ///
    /// Without a token this only requests one; with a token it opens the
    /// widget and, if the user finishes, exchanges the public token.
    pub async fn connect(&self, widget: &dyn LinkWidget) -> LinkStep {
        let link_token = {
            let mut state = self.state.lock().await;
            let link_token = match &*state {
                LinkState::Linked => return LinkStep::AlreadyLinked,
                LinkState::TokenRequested | LinkState::Linking { .. } => return LinkStep::Busy,
                LinkState::NoToken => None,
                LinkState::TokenReady { link_token } => Some(link_token.clone()),
            };
            if link_token.is_none() {
                *state = LinkState::TokenRequested;
            }
            link_token
        };

        match link_token {
            None => self.request_token().await,
            Some(link_token) => self.open_widget(widget, link_token).await,
        }
    }

    async fn request_token(&self) -> LinkStep {
        let client_id = self.session.client_id();

        match self.api.create_link_token(&client_id).await {
            Ok(link_token) => {
                tracing::debug!(client_id = %client_id, "Link token received");
                *self.state.lock().await = LinkState::TokenReady { link_token };
                LinkStep::TokenReady
            }
            Err(e) => {
                tracing::warn!(client_id = %client_id, error = %e, "Link token request failed");
                *self.state.lock().await = LinkState::NoToken;
                self.notifications.error("Failed to initialize bank link");
                LinkStep::TokenFailed
            }
        }
    }

    async fn open_widget(&self, widget: &dyn LinkWidget, link_token: String) -> LinkStep {
        match widget.open(&link_token).await {
            Ok(Some(public_token)) => self.finish(link_token, &public_token).await,
            Ok(None) => {
                tracing::info!("Link widget exited without linking");
                LinkStep::Exited
            }
            Err(e) => {
                tracing::warn!(error = %e, "Link widget failed");
                self.notifications.error("Failed to connect your account");
                LinkStep::WidgetFailed
            }
        }
    }

    async fn finish(&self, link_token: String, public_token: &str) -> LinkStep {
        *self.state.lock().await = LinkState::Linking {
            link_token: link_token.clone(),
        };

        let client_id = self.session.client_id();
        match self.api.exchange_public_token(public_token, &client_id).await {
            Ok(_) => {
                *self.state.lock().await = LinkState::Linked;
                self.session.mark_connected();
                self.notifications
                    .success("Your account was successfully connected!");
                LinkStep::Linked
            }
            Err(e) => {
                tracing::warn!(client_id = %client_id, error = %e, "Public token exchange failed");
                *self.state.lock().await = LinkState::TokenReady { link_token };
                self.notifications.error("Failed to connect your account");
                LinkStep::ExchangeFailed
            }
        }
    }
}
