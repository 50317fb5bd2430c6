//! End-to-end store flows against a scripted gateway
//!
//! Exercises the full path UI action -> store operation -> gateway ->
//! normalizer -> store state, including the independently-refreshed
//! active/archived views.

use async_trait::async_trait;
use mindlog_client::{ArchiveOutcome, IdeaGateway, IdeaStore};
use mindlog_client::{ArchivedIdeaStore, StaticTokenProvider};
use mindlog_common::api::types::ApiEntry;
use mindlog_common::error::Result;
use mindlog_common::{IdeaInput, IdeaUpdate};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory backend holding entries keyed by id, in insertion order
struct FakeBackend {
    entries: Mutex<Vec<ApiEntry>>,
    archived_flags: Mutex<HashMap<String, bool>>,
    next_id: Mutex<u32>,
}

impl FakeBackend {
    fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            archived_flags: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
        }
    }

    fn is_archived(&self, id: &str) -> bool {
        *self
            .archived_flags
            .lock()
            .unwrap()
            .get(id)
            .unwrap_or(&false)
    }
}

#[async_trait]
impl IdeaGateway for FakeBackend {
    async fn list(&self, _token: &str, _limit: u64, _offset: u64) -> Result<Vec<ApiEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| !self.is_archived(&e.id))
            .cloned()
            .collect())
    }

    async fn list_archived(&self, _token: &str, _limit: u64, _offset: u64) -> Result<Vec<ApiEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| self.is_archived(&e.id))
            .cloned()
            .map(|mut e| {
                e.is_archived = true;
                e
            })
            .collect())
    }

    async fn get_by_id(&self, id: &str, _token: &str) -> Result<ApiEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(mindlog_common::Error::NotFound)
    }

    async fn create_with_transcription(
        &self,
        transcription: &str,
        duration: f64,
        _token: &str,
    ) -> Result<ApiEntry> {
        let mut next_id = self.next_id.lock().unwrap();
        let entry = ApiEntry {
            id: format!("a{}", *next_id),
            transcription: Some(transcription.to_string()),
            created_at: "2024-01-01".to_string(),
            category_name: Some("tasks".to_string()),
            duration: Some(duration),
            ..Default::default()
        };
        *next_id += 1;
        self.entries.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn create_with_audio(
        &self,
        _audio: Vec<u8>,
        duration: f64,
        token: &str,
    ) -> Result<ApiEntry> {
        self.create_with_transcription("(transcribing)", duration, token)
            .await
    }

    async fn update(&self, id: &str, _updates: &IdeaUpdate, token: &str) -> Result<ApiEntry> {
        self.get_by_id(id, token).await
    }

    async fn delete(&self, id: &str, _token: &str) -> Result<()> {
        self.entries.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }

    async fn set_archived(
        &self,
        id: &str,
        is_archived: bool,
        _token: &str,
    ) -> Result<ArchiveOutcome> {
        self.archived_flags
            .lock()
            .unwrap()
            .insert(id.to_string(), is_archived);
        Ok(ArchiveOutcome {
            entry_id: id.to_string(),
            is_archived,
        })
    }
}

fn stores(backend: Arc<FakeBackend>) -> (IdeaStore, ArchivedIdeaStore) {
    let auth = Arc::new(StaticTokenProvider::new("tok"));
    (
        IdeaStore::new(backend.clone(), auth.clone(), 10),
        ArchivedIdeaStore::new(backend, auth, 10),
    )
}

#[tokio::test]
async fn create_from_empty_collection_end_to_end() {
    let (store, _) = stores(Arc::new(FakeBackend::new()));
    store.refresh().await;
    assert!(store.ideas().await.is_empty());

    let created = store
        .create(&IdeaInput {
            transcription: "buy milk".to_string(),
            duration: 0.0,
        })
        .await
        .expect("creation should succeed");

    let ideas = store.ideas().await;
    assert_eq!(ideas.len(), 1);
    assert_eq!(ideas[0], created);
    assert_eq!(ideas[0].id, "a1");
    assert_eq!(ideas[0].transcription, "buy milk");
    assert_eq!(ideas[0].category, "tasks");
    assert!(!ideas[0].ai_processed);
    assert!(!ideas[0].is_archived);
}

#[tokio::test]
async fn archive_then_unarchive_across_independent_views() {
    let backend = Arc::new(FakeBackend::new());
    let (store, archived) = stores(backend);

    store
        .create(&IdeaInput {
            transcription: "first".to_string(),
            duration: 0.0,
        })
        .await
        .unwrap();
    store
        .create(&IdeaInput {
            transcription: "second".to_string(),
            duration: 0.0,
        })
        .await
        .unwrap();

    // Archive the first idea: it leaves the active view immediately
    assert!(store.archive("a1").await);
    let active_ids: Vec<String> = store.ideas().await.into_iter().map(|i| i.id).collect();
    assert_eq!(active_ids, ["a2"]);

    // The archived store only sees it after its own refresh
    assert!(archived.ideas().await.is_empty());
    archived.refresh().await;
    let archived_ids: Vec<String> = archived.ideas().await.into_iter().map(|i| i.id).collect();
    assert_eq!(archived_ids, ["a1"]);
    assert!(archived.ideas().await[0].is_archived);

    // Unarchive: leaves the archived view, active view unchanged until its
    // next refresh
    assert!(archived.unarchive("a1").await);
    assert!(archived.ideas().await.is_empty());
    let active_ids: Vec<String> = store.ideas().await.into_iter().map(|i| i.id).collect();
    assert_eq!(active_ids, ["a2"]);

    store.refresh().await;
    let mut active_ids: Vec<String> = store.ideas().await.into_iter().map(|i| i.id).collect();
    active_ids.sort();
    assert_eq!(active_ids, ["a1", "a2"]);
}

#[tokio::test]
async fn update_and_delete_flow() {
    let backend = Arc::new(FakeBackend::new());
    let (store, _) = stores(backend);

    store
        .create(&IdeaInput {
            transcription: "draft".to_string(),
            duration: 0.0,
        })
        .await
        .unwrap();

    let update = IdeaUpdate {
        transcription: Some("polished".to_string()),
        ..Default::default()
    };
    assert!(store.update("a1", &update).await);
    assert_eq!(store.ideas().await[0].transcription, "polished");

    assert!(store.delete("a1").await);
    assert!(store.ideas().await.is_empty());
}

#[tokio::test]
async fn audio_capture_end_to_end() {
    let (store, _) = stores(Arc::new(FakeBackend::new()));

    let created = store
        .create_with_audio(vec![0u8; 64], 3.5)
        .await
        .expect("audio creation should succeed");

    assert_eq!(created.audio_duration, Some(3.5));
    assert_eq!(store.ideas().await.len(), 1);
}
