//! Connection Context
//!
//! Session-scoped answer to "is a bank account linked", plus the identifier
//! that scopes every backend request. Passed explicitly as `Arc<Session>` to
//! every panel; changes are published on a `watch` channel.

use tokio::sync::watch;

use crate::api::FinanceApi;

/// Snapshot of the connection context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionScope {
    pub connected: bool,
    pub client_id: String,
}

/// Connection context shared by all panels
pub struct Session {
    scope: watch::Sender<SessionScope>,
}

impl Session {
    /// Create a disconnected session for the given client identifier
    pub fn new(client_id: impl Into<String>) -> Self {
        let (scope, _) = watch::channel(SessionScope {
            connected: false,
            client_id: client_id.into(),
        });
        Self { scope }
    }

    pub fn scope(&self) -> SessionScope {
        self.scope.borrow().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.scope.borrow().connected
    }

    pub fn client_id(&self) -> String {
        self.scope.borrow().client_id.clone()
    }

    /// Receiver notified on every connection or identifier change
    pub fn subscribe(&self) -> watch::Receiver<SessionScope> {
        self.scope.subscribe()
    }

    /// Latch the session to connected. There is no way back.
    pub fn mark_connected(&self) {
        let changed = self.scope.send_if_modified(|scope| {
            if scope.connected {
                false
            } else {
                scope.connected = true;
                true
            }
        });

        if changed {
            tracing::info!(client_id = %self.client_id(), "Bank account connected");
        }
    }

    /// Change the identifier that scopes backend requests
    pub fn set_client_id(&self, client_id: impl Into<String>) {
        let client_id = client_id.into();
        self.scope.send_if_modified(|scope| {
            if scope.client_id == client_id {
                false
            } else {
                scope.client_id = client_id;
                true
            }
        });
    }

    /// Ask the backend whether an account is already linked.
    ///
    /// Connected means the transactions read succeeded and returned at least
    /// one row. Failures count as not connected and are not surfaced. A
    /// session that is already connected stays connected.
    pub async fn probe_connection(&self, api: &dyn FinanceApi) -> bool {
        let client_id = self.client_id();

        let linked = match api.fetch_transactions(&client_id).await {
            Ok(transactions) => !transactions.is_empty(),
            Err(e) => {
                tracing::debug!(client_id = %client_id, error = %e, "Connection probe failed");
                false
            }
        };

        if linked {
            self.mark_connected();
        }

        self.is_connected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_transactions, MockApi};

    #[test]
    fn test_starts_disconnected() {
        let session = Session::new("client-1");
        assert!(!session.is_connected());
        assert_eq!(session.client_id(), "client-1");
    }

    #[test]
    fn test_mark_connected_latches() {
        let session = Session::new("client-1");
        let mut rx = session.subscribe();

        session.mark_connected();
        assert!(session.is_connected());
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        // Second latch is a no-op and does not notify
        session.mark_connected();
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_set_client_id_notifies_only_on_change() {
        let session = Session::new("client-1");
        let mut rx = session.subscribe();

        session.set_client_id("client-1");
        assert!(!rx.has_changed().unwrap());

        session.set_client_id("client-2");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().client_id, "client-2");
    }

    #[tokio::test]
    async fn test_probe_with_transactions() {
        let api = MockApi::new();
        api.set_transactions(Ok(sample_transactions()));
        let session = Session::new("client-1");

        assert!(session.probe_connection(&api).await);
        assert!(session.is_connected());
        assert_eq!(api.calls().transactions, 1);
        assert_eq!(api.last_client_id().as_deref(), Some("client-1"));
    }

    #[tokio::test]
    async fn test_probe_with_empty_collection() {
        let api = MockApi::new();
        api.set_transactions(Ok(Vec::new()));
        let session = Session::new("client-1");

        assert!(!session.probe_connection(&api).await);
    }

    #[tokio::test]
    async fn test_probe_failure_is_swallowed() {
        let api = MockApi::new();
        api.fail_transactions();
        let session = Session::new("client-1");

        assert!(!session.probe_connection(&api).await);
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn test_probe_never_downgrades() {
        let api = MockApi::new();
        api.fail_transactions();
        let session = Session::new("client-1");
        session.mark_connected();

        assert!(session.probe_connection(&api).await);
    }
}
