//! Collection stores
//!
//! Each store owns an in-memory view of the remote entry set (active or
//! archived), a loading flag, and a shared error slot. All mutation goes
//! through the store's own operations; errors are reduced to a message at
//! the operation boundary and never rethrown past it.

pub mod archived;
pub mod ideas;

#[cfg(test)]
pub(crate) mod test_support;

pub use archived::ArchivedIdeaStore;
pub use ideas::IdeaStore;
