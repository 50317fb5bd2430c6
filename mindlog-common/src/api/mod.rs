//! Wire-level types for the entries API

pub mod types;

pub use types::{ApiEntry, ApiResponse, ArchiveResponse, CreateEntryRequest, ProcessedContent};
