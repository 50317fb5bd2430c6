//! Remote gateway for the entries API
//!
//! One method per remote capability. The gateway owns request shaping (JSON
//! vs multipart), bearer auth, status checking, and response unwrapping; it
//! returns raw wire records and leaves normalization to the caller. No
//! operation retries automatically.

use async_trait::async_trait;
use mindlog_common::api::types::{ApiEntry, ApiResponse, ArchiveResponse, CreateEntryRequest};
use mindlog_common::error::{Error, Result};
use mindlog_common::IdeaUpdate;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = "mindlog/0.1.0";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// File name the backend expects for uploaded recordings
const AUDIO_FILE_NAME: &str = "recording.webm";

/// Confirmation returned by the archive-toggle endpoint
///
/// The endpoint confirms with an id and the applied flag only; callers must
/// not expect fresh server state back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOutcome {
    pub entry_id: String,
    pub is_archived: bool,
}

/// Remote operations on idea entries
///
/// Every method takes an opaque bearer token; acquiring one is the caller's
/// concern. Implemented by [`HttpIdeaGateway`] in production and by scripted
/// fakes in store tests.
#[async_trait]
pub trait IdeaGateway: Send + Sync {
    /// Fetch one page of entries (active and archived mixed)
    async fn list(&self, token: &str, limit: u64, offset: u64) -> Result<Vec<ApiEntry>>;

    /// Fetch one page including archived entries, filtered to archived only
    async fn list_archived(&self, token: &str, limit: u64, offset: u64) -> Result<Vec<ApiEntry>>;

    /// Fetch a single entry by id
    async fn get_by_id(&self, id: &str, token: &str) -> Result<ApiEntry>;

    /// Create an entry from text
    async fn create_with_transcription(
        &self,
        transcription: &str,
        duration: f64,
        token: &str,
    ) -> Result<ApiEntry>;

    /// Create an entry from a recorded audio blob
    async fn create_with_audio(
        &self,
        audio: Vec<u8>,
        duration: f64,
        token: &str,
    ) -> Result<ApiEntry>;

    /// Apply a partial update to an entry
    async fn update(&self, id: &str, updates: &IdeaUpdate, token: &str) -> Result<ApiEntry>;

    /// Delete an entry; fire-and-forget, no payload expected back
    async fn delete(&self, id: &str, token: &str) -> Result<()>;

    /// Archive or unarchive an entry
    async fn set_archived(
        &self,
        id: &str,
        is_archived: bool,
        token: &str,
    ) -> Result<ArchiveOutcome>;
}

/// Unwrap a creation response, where the entry may sit under `data` or
/// `entry` depending on backend version
fn created_entry(response: ApiResponse) -> Result<ApiEntry> {
    response
        .data
        .or(response.entry)
        .ok_or(Error::NoEntryReturned)
}

/// Unwrap an archive-toggle response into a confirmed outcome
fn archive_outcome(response: ArchiveResponse, is_archived: bool) -> Result<ArchiveOutcome> {
    if response.success != Some(true) {
        return Err(Error::NoEntryId);
    }
    let entry_id = response.entry_id.ok_or(Error::NoEntryId)?;
    Ok(ArchiveOutcome {
        entry_id,
        is_archived,
    })
}

/// Keep only truthy-archived entries
///
/// The include-archived listing does not guarantee archived-only results,
/// so the gateway filters client-side.
fn filter_archived(entries: Vec<ApiEntry>) -> Vec<ApiEntry> {
    entries.into_iter().filter(|e| e.is_archived).collect()
}

/// HTTP implementation of the gateway over reqwest
pub struct HttpIdeaGateway {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpIdeaGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request, check the status, and decode the JSON body
    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))
    }

    /// Send a request where only the status matters
    async fn send_no_body(&self, request: reqwest::RequestBuilder) -> Result<()> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Api(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[async_trait]
impl IdeaGateway for HttpIdeaGateway {
    async fn list(&self, token: &str, limit: u64, offset: u64) -> Result<Vec<ApiEntry>> {
        tracing::debug!(limit, offset, "GET /entries");

        let response: ApiResponse = self
            .send_json(
                self.http_client
                    .get(self.url("/entries"))
                    .query(&[("limit", limit), ("offset", offset)])
                    .bearer_auth(token),
            )
            .await?;

        Ok(response.entries.unwrap_or_default())
    }

    async fn list_archived(&self, token: &str, limit: u64, offset: u64) -> Result<Vec<ApiEntry>> {
        tracing::debug!(limit, offset, "GET /entries?include_archived=true");

        let response: ApiResponse = self
            .send_json(
                self.http_client
                    .get(self.url("/entries"))
                    .query(&[("include_archived", "true")])
                    .query(&[("limit", limit), ("offset", offset)])
                    .bearer_auth(token),
            )
            .await?;

        Ok(filter_archived(response.entries.unwrap_or_default()))
    }

    async fn get_by_id(&self, id: &str, token: &str) -> Result<ApiEntry> {
        tracing::debug!(id, "GET /entries/{{id}}");

        let response: ApiResponse = self
            .send_json(
                self.http_client
                    .get(self.url(&format!("/entries/{id}")))
                    .bearer_auth(token),
            )
            .await?;

        response.entry.ok_or(Error::NotFound)
    }

    async fn create_with_transcription(
        &self,
        transcription: &str,
        duration: f64,
        token: &str,
    ) -> Result<ApiEntry> {
        tracing::debug!(duration, "POST /entries (text)");

        let body = CreateEntryRequest {
            transcription: transcription.to_string(),
            duration,
        };

        let response: ApiResponse = self
            .send_json(
                self.http_client
                    .post(self.url("/entries"))
                    .bearer_auth(token)
                    .json(&body),
            )
            .await?;

        created_entry(response)
    }

    async fn create_with_audio(
        &self,
        audio: Vec<u8>,
        duration: f64,
        token: &str,
    ) -> Result<ApiEntry> {
        tracing::debug!(duration, bytes = audio.len(), "POST /entries (audio)");

        let form = Form::new()
            .part("audio_file", Part::bytes(audio).file_name(AUDIO_FILE_NAME))
            .text("duration", duration.to_string());

        let response: ApiResponse = self
            .send_json(
                self.http_client
                    .post(self.url("/entries"))
                    .bearer_auth(token)
                    .multipart(form),
            )
            .await?;

        created_entry(response)
    }

    async fn update(&self, id: &str, updates: &IdeaUpdate, token: &str) -> Result<ApiEntry> {
        tracing::debug!(id, "PATCH /entries/{{id}}");

        let response: ApiResponse = self
            .send_json(
                self.http_client
                    .patch(self.url(&format!("/entries/{id}")))
                    .bearer_auth(token)
                    .json(updates),
            )
            .await?;

        response.entry.ok_or(Error::NoEntryReturned)
    }

    async fn delete(&self, id: &str, token: &str) -> Result<()> {
        tracing::debug!(id, "DELETE /entries/{{id}}");

        self.send_no_body(
            self.http_client
                .delete(self.url(&format!("/entries/{id}")))
                .bearer_auth(token),
        )
        .await
    }

    async fn set_archived(
        &self,
        id: &str,
        is_archived: bool,
        token: &str,
    ) -> Result<ArchiveOutcome> {
        tracing::debug!(id, is_archived, "PATCH /entries/{{id}}/archive");

        let response: ArchiveResponse = self
            .send_json(
                self.http_client
                    .patch(self.url(&format!("/entries/{id}/archive")))
                    .bearer_auth(token)
                    .json(&serde_json::json!({ "is_archived": is_archived })),
            )
            .await?;

        archive_outcome(response, is_archived)
    }
}
