//! Raw request/response types for the entries API
//!
//! These mirror exactly what the backend returns, alias fields and all. The
//! same concept can arrive under several legacy names (transcription under
//! three keys, category under three), and `is_archived` is loosely typed
//! (the backend is known to send `1`). Every field except `id` and
//! `created_at` is optional; collapsing the ambiguity into the domain shape
//! is the mapper's job, not serde's.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// AI-processed content attached to an entry
///
/// Wire keys are the backend's original Spanish names; unknown keys are
/// preserved so the serialized analysis payload stays faithful.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProcessedContent {
    #[serde(rename = "titulo", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(rename = "categoria_sugerida", skip_serializing_if = "Option::is_none")]
    pub suggested_category: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One raw entry as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ApiEntry {
    pub id: String,

    pub category_name: Option<String>,

    #[serde(default)]
    pub created_at: String,

    /// Short preview of the content; last-resort transcription source
    pub preview: Option<String>,

    pub transcription: Option<String>,

    /// Legacy pre-processing transcription field
    pub raw_transcription: Option<String>,

    pub content_json: Option<Map<String, Value>>,

    pub content_markdown: Option<String>,

    /// Alias of `content_markdown` used by newer backend versions
    pub markdown_content: Option<String>,

    pub processed_content: Option<ProcessedContent>,

    pub user_id: Option<String>,

    pub category_id: Option<String>,

    /// Recording length in seconds
    pub duration: Option<f64>,

    /// Loosely typed on the wire: bool, 0/1, or absent
    #[serde(default, deserialize_with = "truthy")]
    pub is_archived: bool,
}

/// Envelope shape shared by the entries endpoints
///
/// Which fields are present depends on the operation: list responses carry
/// `entries`, single-entry responses carry `entry`, and creation responses
/// carry the new entry under either `data` or `entry` depending on backend
/// version.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiResponse {
    pub entries: Option<Vec<ApiEntry>>,
    pub entry: Option<ApiEntry>,
    pub data: Option<ApiEntry>,
    pub success: Option<bool>,
    pub total: Option<u64>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Response of the archive-toggle endpoint
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArchiveResponse {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub entry_id: Option<String>,
}

/// JSON body for text-based creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntryRequest {
    pub transcription: String,
    pub duration: f64,
}

/// Coerce a loosely-typed archived flag to bool
///
/// Accepts bool, any nonzero number, and null/absent (false). Both the
/// archived-list filter and the normalizer go through this single coercion
/// so the two layers cannot disagree about the same payload.
fn truthy<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    })
}
