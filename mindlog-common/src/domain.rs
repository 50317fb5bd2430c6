//! Domain model for captured ideas
//!
//! The canonical shape the client works with after normalization. Wire-level
//! ambiguity (legacy field aliases, loosely-typed flags) never leaks past the
//! mapper into these types.

use serde::{Deserialize, Serialize};

/// Sentinel category used when the server supplies none.
///
/// The domain invariant is that `Idea::category` is never empty, even when
/// every upstream category field is absent.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// One captured idea (text or audio-derived)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    /// Server-assigned identifier, immutable
    pub id: String,

    /// Derived title; absent until AI processing completes
    pub title: Option<String>,

    /// The user's raw or dictated content; never empty at creation
    pub transcription: String,

    /// Playback URL for the source audio (never sourced today; reserved)
    pub audio_url: Option<String>,

    /// Recording length in seconds, when the idea came from audio
    pub audio_duration: Option<f64>,

    /// Server-assigned creation timestamp, passed through verbatim
    pub created_at: String,

    /// Always populated; falls back to [`DEFAULT_CATEGORY`]
    pub category: String,

    /// True iff the server attached processed markdown; derived, never set
    /// independently
    pub ai_processed: bool,

    /// Serialized AI analysis payload, when present
    pub ai_analysis: Option<String>,

    /// Processed markdown, when present
    pub ai_markdown: Option<String>,

    /// Reserved; always empty today
    pub tags: Vec<String>,

    /// Whether the server holds this entry as archived
    pub is_archived: bool,
}

/// Input for creating an idea from text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaInput {
    pub transcription: String,
    /// Seconds; 0 for pure-text capture
    pub duration: f64,
}

/// Partial update for an existing idea
///
/// Excludes `id` and `created_at` (immutable), the archive flag (archiving
/// is its own operation, never a side effect of update), and the derived AI
/// fields. Unset fields are omitted from the PATCH body and preserved in the
/// local merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_duration: Option<f64>,
}

impl Idea {
    /// Merge a partial update into this idea, preserving unset fields
    ///
    /// This is the optimistic local merge applied after the server confirms
    /// an update; the server's echoed entry is never consulted.
    pub fn apply_update(&mut self, update: &IdeaUpdate) {
        if let Some(title) = &update.title {
            self.title = Some(title.clone());
        }
        if let Some(transcription) = &update.transcription {
            self.transcription = transcription.clone();
        }
        if let Some(category) = &update.category {
            self.category = category.clone();
        }
        if let Some(tags) = &update.tags {
            self.tags = tags.clone();
        }
        if let Some(duration) = update.audio_duration {
            self.audio_duration = Some(duration);
        }
    }
}
