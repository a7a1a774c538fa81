//! Remote Resources
//!
//! The four-state view model shared by every data-bound panel.
//!
//! A [`ResourceSlot`] owns the state of one panel's resource. Every fetch
//! takes a [`RequestTicket`] from the slot; only the ticket of the most
//! recently started request may write its result back, so a slow response
//! can never overwrite a newer one. Closing the slot ends its lifetime and
//! every later completion is dropped.
//!
//! [`ResourcePanel`] ties a slot to the session and a [`Resource`] fetch
//! function.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::api::{ApiResult, FinanceApi};
use crate::session::{Session, SessionScope};

/// State of a remote resource
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResource<T> {
    /// No fetch has been issued
    NotApplicable,
    /// A fetch is in flight
    Loading,
    /// The latest fetch failed; holds the user-facing message
    Failed(String),
    /// The latest fetch succeeded
    Ready(T),
}

/// Payloads that can be "successfully empty"
pub trait ResourceData {
    fn is_empty(&self) -> bool;
}

impl<T> ResourceData for Vec<T> {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

impl<T> ResourceData for Option<T> {
    fn is_empty(&self) -> bool {
        self.is_none()
    }
}

/// What a panel shows, resolved in precedence order
#[derive(Debug, PartialEq)]
pub enum ViewState<'a, T> {
    Disconnected,
    Loading,
    Error(&'a str),
    Empty,
    Loaded(&'a T),
}

impl<'a, T: ResourceData> ViewState<'a, T> {
    /// Resolve the visible state: disconnected, then loading, then error,
    /// then empty or loaded.
    pub fn resolve(connected: bool, state: &'a RemoteResource<T>) -> Self {
        if !connected {
            return ViewState::Disconnected;
        }

        match state {
            // Connected but the first fetch has not started yet
            RemoteResource::NotApplicable | RemoteResource::Loading => ViewState::Loading,
            RemoteResource::Failed(message) => ViewState::Error(message),
            RemoteResource::Ready(data) if data.is_empty() => ViewState::Empty,
            RemoteResource::Ready(data) => ViewState::Loaded(data),
        }
    }
}

/// Proof that a fetch was started; needed to write its result back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

struct SlotInner<T> {
    state: RemoteResource<T>,
    generation: u64,
    closed: bool,
    updated_at: Option<DateTime<Utc>>,
}

/// Per-panel resource state with request tokens and a lifetime scope
pub struct ResourceSlot<T> {
    inner: RwLock<SlotInner<T>>,
}

impl<T> Default for ResourceSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResourceSlot<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(SlotInner {
                state: RemoteResource::NotApplicable,
                generation: 0,
                closed: false,
                updated_at: None,
            }),
        }
    }

    /// Start a request: enter `Loading` and hand out the newest ticket.
    ///
    /// Returns `None` once the slot is closed.
    pub async fn begin(&self) -> Option<RequestTicket> {
        let mut inner = self.inner.write().await;
        if inner.closed {
            return None;
        }

        inner.generation += 1;
        inner.state = RemoteResource::Loading;
        Some(RequestTicket {
            generation: inner.generation,
        })
    }

    /// Write a finished request back.
    ///
    /// Returns `false` when the result was discarded because a newer request
    /// has started or the slot was closed.
    pub async fn complete(&self, ticket: RequestTicket, result: Result<T, String>) -> bool {
        let mut inner = self.inner.write().await;

        if inner.closed {
            tracing::debug!(generation = ticket.generation, "Dropping result for closed slot");
            return false;
        }
        if ticket.generation != inner.generation {
            tracing::debug!(
                generation = ticket.generation,
                latest = inner.generation,
                "Dropping stale result"
            );
            return false;
        }

        inner.state = match result {
            Ok(data) => RemoteResource::Ready(data),
            Err(message) => RemoteResource::Failed(message),
        };
        inner.updated_at = Some(Utc::now());
        true
    }

    /// End the slot's lifetime; in-flight results will be abandoned
    pub async fn close(&self) {
        self.inner.write().await.closed = true;
    }

    pub async fn is_closed(&self) -> bool {
        self.inner.read().await.closed
    }

    pub async fn is_loading(&self) -> bool {
        matches!(self.inner.read().await.state, RemoteResource::Loading)
    }

    /// Generation of the most recently started request
    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    pub async fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.updated_at
    }

    pub async fn snapshot(&self) -> RemoteResource<T>
    where
        T: Clone,
    {
        self.inner.read().await.state.clone()
    }

    /// Run `f` against the resolved view without cloning the payload
    pub async fn with_view<R>(&self, connected: bool, f: impl FnOnce(ViewState<'_, T>) -> R) -> R
    where
        T: ResourceData,
    {
        let inner = self.inner.read().await;
        f(ViewState::resolve(connected, &inner.state))
    }
}

/// A backend resource a panel displays
#[async_trait]
pub trait Resource: Send + Sync {
    type Data: ResourceData + Send + Sync;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Message shown when the fetch fails, e.g. "Failed to load transactions"
    fn failure_message(&self) -> &'static str;

    async fn fetch(&self, api: &dyn FinanceApi, scope: &SessionScope) -> ApiResult<Self::Data>;
}

/// A panel bound to one resource and the session
pub struct ResourcePanel<R: Resource> {
    resource: R,
    api: Arc<dyn FinanceApi>,
    session: Arc<Session>,
    slot: ResourceSlot<R::Data>,
    last_fetched: Mutex<Option<SessionScope>>,
}

impl<R: Resource> ResourcePanel<R> {
    pub fn new(resource: R, api: Arc<dyn FinanceApi>, session: Arc<Session>) -> Self {
        Self {
            resource,
            api,
            session,
            slot: ResourceSlot::new(),
            last_fetched: Mutex::new(None),
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn slot(&self) -> &ResourceSlot<R::Data> {
        &self.slot
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Fetch with the current session scope.
    ///
    /// Does nothing while disconnected. Returns whether the result was
    /// applied to the panel.
    pub async fn refresh(&self) -> bool {
        let scope = self.session.scope();
        if !scope.connected {
            return false;
        }

        let Some(ticket) = self.slot.begin().await else {
            return false;
        };
        *self.last_fetched.lock().await = Some(scope.clone());

        tracing::debug!(
            panel = self.resource.name(),
            client_id = %scope.client_id,
            generation = ticket.generation(),
            "Fetching"
        );

        let result = self
            .resource
            .fetch(self.api.as_ref(), &scope)
            .await
            .map_err(|e| {
                tracing::warn!(panel = self.resource.name(), error = %e, "Fetch failed");
                self.resource.failure_message().to_string()
            });

        self.slot.complete(ticket, result).await
    }

    /// Re-run the fetch after a failure
    pub async fn retry(&self) -> bool {
        self.refresh().await
    }

    /// React to a session change.
    ///
    /// Fetches once when the session became connected or the scoping
    /// identifier changed since the last fetch; otherwise does nothing.
    pub async fn on_scope_change(&self, scope: &SessionScope) -> bool {
        if !scope.connected {
            return false;
        }

        let stale = match self.last_fetched.lock().await.as_ref() {
            None => true,
            Some(last) => !last.connected || last.client_id != scope.client_id,
        };

        if stale {
            self.refresh().await
        } else {
            false
        }
    }

    /// End the panel's lifetime
    pub async fn close(&self) {
        self.slot.close().await;
    }

    pub async fn with_view<T>(&self, f: impl FnOnce(ViewState<'_, R::Data>) -> T) -> T {
        self.slot.with_view(self.session.is_connected(), f).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Transaction;
    use crate::testing::{sample_transactions, MockApi};

    struct TransactionsResource;

    #[async_trait]
    impl Resource for TransactionsResource {
        type Data = Vec<Transaction>;

        fn name(&self) -> &'static str {
            "transactions"
        }

        fn failure_message(&self) -> &'static str {
            "Failed to load transactions"
        }

        async fn fetch(
            &self,
            api: &dyn FinanceApi,
            scope: &SessionScope,
        ) -> ApiResult<Self::Data> {
            api.fetch_transactions(&scope.client_id).await
        }
    }

    fn panel(api: &Arc<MockApi>, session: &Arc<Session>) -> ResourcePanel<TransactionsResource> {
        ResourcePanel::new(
            TransactionsResource,
            Arc::clone(api) as Arc<dyn FinanceApi>,
            Arc::clone(session),
        )
    }

    fn kind<T>(view: ViewState<'_, T>) -> &'static str {
        match view {
            ViewState::Disconnected => "disconnected",
            ViewState::Loading => "loading",
            ViewState::Error(_) => "error",
            ViewState::Empty => "empty",
            ViewState::Loaded(_) => "loaded",
        }
    }

    #[test]
    fn test_precedence_disconnected_wins() {
        let failed: RemoteResource<Vec<u8>> = RemoteResource::Failed("boom".to_string());
        assert_eq!(ViewState::resolve(false, &failed), ViewState::Disconnected);

        let ready = RemoteResource::Ready(vec![1u8]);
        assert_eq!(ViewState::resolve(false, &ready), ViewState::Disconnected);
    }

    #[test]
    fn test_precedence_connected() {
        let loading: RemoteResource<Vec<u8>> = RemoteResource::Loading;
        assert_eq!(ViewState::resolve(true, &loading), ViewState::Loading);

        let failed: RemoteResource<Vec<u8>> = RemoteResource::Failed("boom".to_string());
        assert_eq!(ViewState::resolve(true, &failed), ViewState::Error("boom"));

        let empty: RemoteResource<Vec<u8>> = RemoteResource::Ready(Vec::new());
        assert_eq!(ViewState::resolve(true, &empty), ViewState::Empty);

        let none: RemoteResource<Option<u8>> = RemoteResource::Ready(None);
        assert_eq!(ViewState::resolve(true, &none), ViewState::Empty);

        let data = vec![7u8];
        let ready = RemoteResource::Ready(data.clone());
        assert_eq!(ViewState::resolve(true, &ready), ViewState::Loaded(&data));
    }

    #[tokio::test]
    async fn test_begin_clears_error() {
        let slot: ResourceSlot<Vec<u8>> = ResourceSlot::new();
        let ticket = slot.begin().await.unwrap();
        slot.complete(ticket, Err("nope".to_string())).await;
        assert_eq!(slot.snapshot().await, RemoteResource::Failed("nope".to_string()));

        slot.begin().await.unwrap();
        assert_eq!(slot.snapshot().await, RemoteResource::Loading);
        assert!(slot.is_loading().await);
    }

    #[tokio::test]
    async fn test_stale_result_discarded() {
        let slot: ResourceSlot<Vec<&str>> = ResourceSlot::new();
        let first = slot.begin().await.unwrap();
        let second = slot.begin().await.unwrap();

        // Newer request resolves first, older one afterwards
        assert!(slot.complete(second, Ok(vec!["new"])).await);
        assert!(!slot.complete(first, Ok(vec!["old"])).await);

        assert_eq!(slot.snapshot().await, RemoteResource::Ready(vec!["new"]));
    }

    #[tokio::test]
    async fn test_stale_result_does_not_end_loading() {
        let slot: ResourceSlot<Vec<u8>> = ResourceSlot::new();
        let first = slot.begin().await.unwrap();
        let second = slot.begin().await.unwrap();

        assert!(!slot.complete(first, Ok(vec![1])).await);
        assert!(slot.is_loading().await);

        assert!(slot.complete(second, Err("failed".to_string())).await);
        assert!(!slot.is_loading().await);
    }

    #[tokio::test]
    async fn test_closed_slot_abandons_results() {
        let slot: ResourceSlot<Vec<u8>> = ResourceSlot::new();
        let ticket = slot.begin().await.unwrap();
        slot.close().await;

        assert!(!slot.complete(ticket, Ok(vec![1])).await);
        assert_eq!(slot.snapshot().await, RemoteResource::Loading);
        assert!(slot.begin().await.is_none());
        assert!(slot.updated_at().await.is_none());
    }

    #[tokio::test]
    async fn test_no_fetch_while_disconnected() {
        let api = Arc::new(MockApi::new());
        let session = Arc::new(Session::new("client-1"));
        let panel = panel(&api, &session);

        assert!(!panel.refresh().await);
        assert!(!panel.on_scope_change(&session.scope()).await);
        assert_eq!(api.calls().total(), 0);
        assert_eq!(panel.with_view(kind).await, "disconnected");
    }

    #[tokio::test]
    async fn test_refresh_success_and_empty() {
        let api = Arc::new(MockApi::new());
        let session = Arc::new(Session::new("client-1"));
        session.mark_connected();
        let panel = panel(&api, &session);

        assert_eq!(panel.with_view(kind).await, "loading");

        assert!(panel.refresh().await);
        assert_eq!(panel.with_view(kind).await, "empty");

        api.set_transactions(Ok(sample_transactions()));
        assert!(panel.refresh().await);
        assert_eq!(panel.with_view(kind).await, "loaded");
        assert!(panel.slot().updated_at().await.is_some());
    }

    #[tokio::test]
    async fn test_failure_message_and_retry() {
        let api = Arc::new(MockApi::new());
        api.fail_transactions();
        let session = Arc::new(Session::new("client-1"));
        session.mark_connected();
        let panel = panel(&api, &session);

        panel.refresh().await;
        let message = panel
            .with_view(|view| match view {
                ViewState::Error(message) => Some(message.to_string()),
                _ => None,
            })
            .await;
        assert_eq!(message.as_deref(), Some("Failed to load transactions"));

        api.set_transactions(Ok(sample_transactions()));
        let before = api.calls().transactions;
        assert!(panel.retry().await);
        assert_eq!(api.calls().transactions, before + 1);
        assert_eq!(api.client_ids(), vec!["client-1", "client-1"]);
        assert_eq!(panel.with_view(kind).await, "loaded");
    }

    #[tokio::test]
    async fn test_scope_change_triggers_exactly_one_fetch() {
        let api = Arc::new(MockApi::new());
        let session = Arc::new(Session::new("client-1"));
        let panel = panel(&api, &session);

        session.mark_connected();
        assert!(panel.on_scope_change(&session.scope()).await);
        assert_eq!(api.calls().transactions, 1);

        // Same scope again: nothing to do
        assert!(!panel.on_scope_change(&session.scope()).await);
        assert_eq!(api.calls().transactions, 1);

        session.set_client_id("client-2");
        assert!(panel.on_scope_change(&session.scope()).await);
        assert_eq!(api.calls().transactions, 2);
        assert_eq!(api.last_client_id().as_deref(), Some("client-2"));
    }

    #[tokio::test]
    async fn test_closed_panel_does_not_fetch() {
        let api = Arc::new(MockApi::new());
        let session = Arc::new(Session::new("client-1"));
        session.mark_connected();
        let panel = panel(&api, &session);

        panel.close().await;
        assert!(!panel.refresh().await);
        assert_eq!(api.calls().total(), 0);
    }
}
