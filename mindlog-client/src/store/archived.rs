//! Archived idea store
//!
//! Mirrors the active store's state machine but is scoped to archived
//! records and restricted to delete and unarchive. The active and archived
//! stores are independently-refreshed views: unarchiving only removes from
//! this collection, and the active store picks the record up on its own
//! next refresh.

use crate::auth::TokenProvider;
use crate::gateway::IdeaGateway;
use mindlog_common::error::{Error, Result};
use mindlog_common::{mapper, Idea};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

struct StoreState {
    ideas: Vec<Idea>,
    loading: bool,
    error: Option<String>,
}

/// State container for the archived idea collection
pub struct ArchivedIdeaStore {
    gateway: Arc<dyn IdeaGateway>,
    auth: Arc<dyn TokenProvider>,
    page_limit: u64,

    state: RwLock<StoreState>,

    /// Single-flight latch for refresh
    fetching: AtomicBool,
}

impl ArchivedIdeaStore {
    pub fn new(
        gateway: Arc<dyn IdeaGateway>,
        auth: Arc<dyn TokenProvider>,
        page_limit: u64,
    ) -> Self {
        Self {
            gateway,
            auth,
            page_limit,
            state: RwLock::new(StoreState {
                ideas: Vec::new(),
                loading: true,
                error: None,
            }),
            fetching: AtomicBool::new(false),
        }
    }

    /// Snapshot of the archived collection
    pub async fn ideas(&self) -> Vec<Idea> {
        self.state.read().await.ideas.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    async fn token(&self) -> Result<String> {
        self.auth.token().await.ok_or(Error::NoToken)
    }

    async fn record_error(&self, err: Error) {
        let message = err.to_string();
        tracing::warn!(error = %message, "archived store operation failed");
        self.state.write().await.error = Some(message);
    }

    /// Replace the archived collection from the server
    ///
    /// Same single-flight guarantee as the active store; the gateway's
    /// archived listing is already filtered to truthy-archived entries.
    pub async fn refresh(&self) {
        if self
            .fetching
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("archived refresh already in flight, dropping request");
            return;
        }

        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let result = self.fetch_archived().await;

        {
            let mut state = self.state.write().await;
            match result {
                Ok(ideas) => {
                    tracing::debug!(count = ideas.len(), "refreshed archived collection");
                    state.ideas = ideas;
                    state.error = None;
                }
                Err(err) => {
                    state.error = Some(err.to_string());
                }
            }
            state.loading = false;
        }

        self.fetching.store(false, Ordering::Release);
    }

    async fn fetch_archived(&self) -> Result<Vec<Idea>> {
        let token = self.token().await?;
        let entries = self
            .gateway
            .list_archived(&token, self.page_limit, 0)
            .await?;
        Ok(mapper::from_api_list(&entries))
    }

    /// Delete an archived idea; removes it from this collection on success
    pub async fn delete(&self, id: &str) -> bool {
        match self.try_delete(id).await {
            Ok(()) => true,
            Err(err) => {
                self.record_error(err).await;
                false
            }
        }
    }

    async fn try_delete(&self, id: &str) -> Result<()> {
        let token = self.token().await?;
        self.gateway.delete(id, &token).await?;

        let mut state = self.state.write().await;
        state.ideas.retain(|i| i.id != id);
        state.error = None;
        Ok(())
    }

    /// Unarchive an idea
    ///
    /// On success the record leaves this collection only; the active store
    /// is not populated here.
    pub async fn unarchive(&self, id: &str) -> bool {
        match self.try_unarchive(id).await {
            Ok(()) => true,
            Err(err) => {
                self.record_error(err).await;
                false
            }
        }
    }

    async fn try_unarchive(&self, id: &str) -> Result<()> {
        let token = self.token().await?;
        self.gateway.set_archived(id, false, &token).await?;

        let mut state = self.state.write().await;
        state.ideas.retain(|i| i.id != id);
        state.error = None;
        Ok(())
    }
}
