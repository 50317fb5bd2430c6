//! # Mindlog Common Library
//!
//! Shared code for the mindlog client including:
//! - Domain model (Idea and its input/update variants)
//! - Raw wire types returned by the entries API
//! - Normalization from wire records to the domain shape
//! - Creation-input validation
//! - Configuration loading

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod mapper;
pub mod validator;

pub use domain::{Idea, IdeaInput, IdeaUpdate};
pub use error::{Error, Result};
