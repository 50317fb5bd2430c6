//! Scripted gateway fake for store tests
//!
//! Each operation pops the next scripted result for that operation, falling
//! back to a benign default, and counts its calls. An optional gate lets a
//! test hold a list call in flight to exercise the single-flight latch.

use crate::gateway::{ArchiveOutcome, IdeaGateway};
use async_trait::async_trait;
use mindlog_common::api::types::ApiEntry;
use mindlog_common::error::Result;
use mindlog_common::IdeaUpdate;
use std::collections::VecDeque;
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Build a raw entry with predictable content for assertions
pub fn entry(id: &str) -> ApiEntry {
    ApiEntry {
        id: id.to_string(),
        transcription: Some(format!("note {id}")),
        created_at: "2024-01-01".to_string(),
        ..Default::default()
    }
}

pub struct MockGateway {
    pub list_calls: AtomicUsize,
    pub archived_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub create_audio_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub set_archived_calls: AtomicUsize,

    list_results: Mutex<VecDeque<Result<Vec<ApiEntry>>>>,
    archived_results: Mutex<VecDeque<Result<Vec<ApiEntry>>>>,
    get_results: Mutex<VecDeque<Result<ApiEntry>>>,
    create_results: Mutex<VecDeque<Result<ApiEntry>>>,
    create_audio_results: Mutex<VecDeque<Result<ApiEntry>>>,
    update_results: Mutex<VecDeque<Result<ApiEntry>>>,
    delete_results: Mutex<VecDeque<Result<()>>>,
    set_archived_results: Mutex<VecDeque<Result<ArchiveOutcome>>>,

    /// When present, list calls park here until the test opens the gate
    gate: Option<Arc<Semaphore>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            list_calls: AtomicUsize::new(0),
            archived_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            create_audio_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            set_archived_calls: AtomicUsize::new(0),
            list_results: Mutex::new(VecDeque::new()),
            archived_results: Mutex::new(VecDeque::new()),
            get_results: Mutex::new(VecDeque::new()),
            create_results: Mutex::new(VecDeque::new()),
            create_audio_results: Mutex::new(VecDeque::new()),
            update_results: Mutex::new(VecDeque::new()),
            delete_results: Mutex::new(VecDeque::new()),
            set_archived_results: Mutex::new(VecDeque::new()),
            gate: None,
        }
    }

    pub fn with_gate(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Release one gated list call
    pub fn open_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn script_list(&self, result: Result<Vec<ApiEntry>>) {
        self.list_results.lock().unwrap().push_back(result);
    }

    pub fn script_archived(&self, result: Result<Vec<ApiEntry>>) {
        self.archived_results.lock().unwrap().push_back(result);
    }

    pub fn script_get(&self, result: Result<ApiEntry>) {
        self.get_results.lock().unwrap().push_back(result);
    }

    pub fn script_create(&self, result: Result<ApiEntry>) {
        self.create_results.lock().unwrap().push_back(result);
    }

    pub fn script_create_audio(&self, result: Result<ApiEntry>) {
        self.create_audio_results.lock().unwrap().push_back(result);
    }

    pub fn script_update(&self, result: Result<ApiEntry>) {
        self.update_results.lock().unwrap().push_back(result);
    }

    pub fn script_delete(&self, result: Result<()>) {
        self.delete_results.lock().unwrap().push_back(result);
    }

    pub fn script_set_archived(&self, result: Result<ArchiveOutcome>) {
        self.set_archived_results.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl IdeaGateway for MockGateway {
    async fn list(&self, _token: &str, _limit: u64, _offset: u64) -> Result<Vec<ApiEntry>> {
        self.list_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.list_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn list_archived(&self, _token: &str, _limit: u64, _offset: u64) -> Result<Vec<ApiEntry>> {
        self.archived_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.archived_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_by_id(&self, id: &str, _token: &str) -> Result<ApiEntry> {
        self.get_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.get_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(entry(id)))
    }

    async fn create_with_transcription(
        &self,
        _transcription: &str,
        _duration: f64,
        _token: &str,
    ) -> Result<ApiEntry> {
        self.create_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.create_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(entry("created")))
    }

    async fn create_with_audio(
        &self,
        _audio: Vec<u8>,
        _duration: f64,
        _token: &str,
    ) -> Result<ApiEntry> {
        self.create_audio_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.create_audio_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(entry("created-audio")))
    }

    async fn update(&self, id: &str, _updates: &IdeaUpdate, _token: &str) -> Result<ApiEntry> {
        self.update_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.update_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(entry(id)))
    }

    async fn delete(&self, _id: &str, _token: &str) -> Result<()> {
        self.delete_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.delete_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(()))
    }

    async fn set_archived(
        &self,
        id: &str,
        is_archived: bool,
        _token: &str,
    ) -> Result<ArchiveOutcome> {
        self.set_archived_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.set_archived_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(ArchiveOutcome {
                    entry_id: id.to_string(),
                    is_archived,
                })
            })
    }
}
