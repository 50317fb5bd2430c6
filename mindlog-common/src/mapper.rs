//! Entry normalization
//!
//! Collapses the wire-level ambiguity of [`ApiEntry`] into the canonical
//! [`Idea`] shape. Every extraction is a pure function with a fixed priority
//! order per field: first non-empty source wins, matching how the backend's
//! legacy and current field names coexist. Normalization is total; a record
//! with nothing but an id still yields a valid Idea via fallbacks.

use crate::api::types::{ApiEntry, ProcessedContent};
use crate::domain::{Idea, DEFAULT_CATEGORY};

/// Treat absent and empty strings the same, matching the wire contract
/// where legacy writers left empty strings behind instead of nulls.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Extract the category from its possible locations, in priority order
fn extract_category(entry: &ApiEntry) -> String {
    non_empty(&entry.category_name)
        .or_else(|| {
            entry
                .processed_content
                .as_ref()
                .and_then(|pc| non_empty(&pc.category))
        })
        .or_else(|| {
            entry
                .processed_content
                .as_ref()
                .and_then(|pc| non_empty(&pc.suggested_category))
        })
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string()
}

fn extract_title(entry: &ApiEntry) -> Option<String> {
    entry
        .processed_content
        .as_ref()
        .and_then(|pc| non_empty(&pc.title))
        .map(str::to_string)
}

/// Extract the transcription, trying the current field, the legacy raw
/// field, then the preview, falling back to an empty string
fn extract_transcription(entry: &ApiEntry) -> String {
    non_empty(&entry.transcription)
        .or_else(|| non_empty(&entry.raw_transcription))
        .or_else(|| non_empty(&entry.preview))
        .unwrap_or("")
        .to_string()
}

/// An entry counts as AI-processed iff either processed-markdown field is
/// non-empty; this is the only source of `ai_processed`
fn is_ai_processed(entry: &ApiEntry) -> bool {
    non_empty(&entry.markdown_content).is_some() || non_empty(&entry.content_markdown).is_some()
}

fn extract_ai_markdown(entry: &ApiEntry) -> Option<String> {
    non_empty(&entry.markdown_content)
        .or_else(|| non_empty(&entry.content_markdown))
        .map(str::to_string)
}

/// Serialize whichever analysis payload is present
fn extract_ai_analysis(entry: &ApiEntry) -> Option<String> {
    if let Some(processed) = &entry.processed_content {
        return serialize_analysis(processed);
    }
    entry
        .content_json
        .as_ref()
        .and_then(|json| serde_json::to_string(json).ok())
}

fn serialize_analysis(content: &ProcessedContent) -> Option<String> {
    serde_json::to_string(content).ok()
}

/// Convert one raw entry to a domain Idea
///
/// Pure and total: no I/O, no failure path. `tags` and `audio_url` are not
/// sourced from the wire record in the current contract and always come out
/// empty/absent.
pub fn from_api(entry: &ApiEntry) -> Idea {
    Idea {
        id: entry.id.clone(),
        title: extract_title(entry),
        transcription: extract_transcription(entry),
        audio_url: None,
        audio_duration: entry.duration,
        created_at: entry.created_at.clone(),
        category: extract_category(entry),
        ai_processed: is_ai_processed(entry),
        ai_analysis: extract_ai_analysis(entry),
        ai_markdown: extract_ai_markdown(entry),
        tags: Vec::new(),
        is_archived: entry.is_archived,
    }
}

/// Convert a page of raw entries, preserving server-supplied order
pub fn from_api_list(entries: &[ApiEntry]) -> Vec<Idea> {
    entries.iter().map(from_api).collect()
}
