//! # Mindlog Client
//!
//! The idea synchronization layer: a reqwest gateway over the entries API,
//! an async token-provider seam, and the two collection stores (active and
//! archived) that cache and optimistically reconcile ideas against the
//! remote store.

pub mod auth;
pub mod gateway;
pub mod store;

pub use auth::{EnvTokenProvider, StaticTokenProvider, TokenProvider};
pub use gateway::{ArchiveOutcome, HttpIdeaGateway, IdeaGateway};
pub use store::{ArchivedIdeaStore, IdeaStore};
