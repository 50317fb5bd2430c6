//! Active idea store
//!
//! Owns the authoritative in-memory set of active ideas and exposes the
//! create/update/delete/archive operations with optimistic local mutation.
//! Refresh is single-flight: a request made while one is in flight is
//! dropped, not queued. A failed refresh keeps the previous collection
//! (stale-but-available over empty-but-fresh).

use crate::auth::TokenProvider;
use crate::gateway::IdeaGateway;
use mindlog_common::error::{Error, Result};
use mindlog_common::{mapper, validator, Idea, IdeaInput, IdeaUpdate};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Compound store state: loading flag, error slot, current collection
struct StoreState {
    ideas: Vec<Idea>,
    loading: bool,
    error: Option<String>,
}

/// State container for the active idea collection
pub struct IdeaStore {
    gateway: Arc<dyn IdeaGateway>,
    auth: Arc<dyn TokenProvider>,
    page_limit: u64,

    state: RwLock<StoreState>,

    /// Single-flight latch for refresh; capacity one, drop on contention
    fetching: AtomicBool,
}

impl IdeaStore {
    /// Create a store with an empty collection in the loading state
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

    /// Snapshot of the current collection, in display order
    pub async fn ideas(&self) -> Vec<Idea> {
        self.state.read().await.ideas.clone()
    }

    /// Current error message, if the last operation failed
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Whether a refresh is populating the collection
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    async fn token(&self) -> Result<String> {
        self.auth.token().await.ok_or(Error::NoToken)
    }

    async fn record_error(&self, err: Error) {
        let message = err.to_string();
        tracing::warn!(error = %message, "idea store operation failed");
        self.state.write().await.error = Some(message);
    }

    /// Replace the collection from the server
    ///
    /// At most one refresh runs at a time; a refresh requested while one is
    /// in flight is dropped entirely. On success the whole collection is
    /// replaced in server order and the error slot cleared; on failure the
    /// previous collection stays and the error message is recorded.
    pub async fn refresh(&self) {
        if self
            .fetching
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("refresh already in flight, dropping request");
            return;
        }

        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let result = self.fetch_ideas().await;

        {
            let mut state = self.state.write().await;
            match result {
                Ok(ideas) => {
                    tracing::debug!(count = ideas.len(), "refreshed idea collection");
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

    async fn fetch_ideas(&self) -> Result<Vec<Idea>> {
        let token = self.token().await?;
        let entries = self.gateway.list(&token, self.page_limit, 0).await?;
        Ok(mapper::from_api_list(&entries))
    }

    /// Create an idea from text
    ///
    /// Validates before any network call; a validation failure records the
    /// error and returns None with no request sent and no state mutation.
    /// On success the new idea is prepended (most-recent-first).
    pub async fn create(&self, input: &IdeaInput) -> Option<Idea> {
        match self.try_create(input).await {
            Ok(idea) => Some(idea),
            Err(err) => {
                self.record_error(err).await;
                None
            }
        }
    }

    async fn try_create(&self, input: &IdeaInput) -> Result<Idea> {
        validator::validate_create_input(&input.transcription, input.duration)?;

        self.state.write().await.error = None;
        let token = self.token().await?;

        let entry = self
            .gateway
            .create_with_transcription(&input.transcription, input.duration, &token)
            .await?;
        let idea = mapper::from_api(&entry);

        let mut state = self.state.write().await;
        state.ideas.insert(0, idea.clone());
        state.error = None;
        Ok(idea)
    }

    /// Create an idea from a recorded audio blob
    ///
    /// Same contract as [`create`](Self::create) minus the local validator:
    /// the server is the sole validator on the audio path.
    pub async fn create_with_audio(&self, audio: Vec<u8>, duration: f64) -> Option<Idea> {
        match self.try_create_with_audio(audio, duration).await {
            Ok(idea) => Some(idea),
            Err(err) => {
                self.record_error(err).await;
                None
            }
        }
    }

    async fn try_create_with_audio(&self, audio: Vec<u8>, duration: f64) -> Result<Idea> {
        self.state.write().await.error = None;
        let token = self.token().await?;

        tracing::debug!(duration, "uploading recorded idea");
        let entry = self
            .gateway
            .create_with_audio(audio, duration, &token)
            .await?;
        let idea = mapper::from_api(&entry);

        let mut state = self.state.write().await;
        state.ideas.insert(0, idea.clone());
        state.error = None;
        Ok(idea)
    }

    /// Apply a partial update
    ///
    /// On success the given fields are merged into the matching local
    /// record; the server's echoed entry is never applied. On failure the
    /// collection is untouched and the error recorded.
    pub async fn update(&self, id: &str, update: &IdeaUpdate) -> bool {
        match self.try_update(id, update).await {
            Ok(()) => true,
            Err(err) => {
                self.record_error(err).await;
                false
            }
        }
    }

    async fn try_update(&self, id: &str, update: &IdeaUpdate) -> Result<()> {
        let token = self.token().await?;
        self.gateway.update(id, update, &token).await?;

        let mut state = self.state.write().await;
        if let Some(idea) = state.ideas.iter_mut().find(|i| i.id == id) {
            idea.apply_update(update);
        }
        state.error = None;
        Ok(())
    }

    /// Delete an idea
    ///
    /// Removes the matching record on success. Deleting an id absent from
    /// the collection still issues the server call and leaves the
    /// collection unchanged.
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

    /// Archive an idea
    ///
    /// On success the record leaves the active collection. The archived
    /// store is not populated here; it picks the record up on its own next
    /// refresh.
    pub async fn archive(&self, id: &str) -> bool {
        match self.try_set_archived(id, true).await {
            Ok(()) => true,
            Err(err) => {
                self.record_error(err).await;
                false
            }
        }
    }

    async fn try_set_archived(&self, id: &str, is_archived: bool) -> Result<()> {
        let token = self.token().await?;
        self.gateway.set_archived(id, is_archived, &token).await?;

        let mut state = self.state.write().await;
        state.ideas.retain(|i| i.id != id);
        state.error = None;
        Ok(())
    }

    /// Fetch one idea directly from the server
    ///
    /// Read-through, not cached: always issues a network fetch and does not
    /// touch the collection. On failure the shared error is recorded and
    /// None returned.
    pub async fn get_details(&self, id: &str) -> Option<Idea> {
        match self.try_get_details(id).await {
            Ok(idea) => Some(idea),
            Err(err) => {
                self.record_error(err).await;
                None
            }
        }
    }

    async fn try_get_details(&self, id: &str) -> Result<Idea> {
        let token = self.token().await?;
        let entry = self.gateway.get_by_id(id, &token).await?;
        Ok(mapper::from_api(&entry))
    }
}
