//! Token provider seam
//!
//! The sync layer never issues credentials itself; it asks an opaque async
//! provider for a bearer token before every operation. Tokens are not cached
//! here — the provider decides freshness.

use async_trait::async_trait;

/// Async source of bearer tokens
///
/// Returns `None` when no token is available, which the stores surface as a
/// local failure before any request is sent.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Option<String>;
}

/// Fixed token, mainly for tests and one-shot scripts
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Provider that never yields a token
    pub fn absent() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// Reads the token from an environment variable on every request
pub struct EnvTokenProvider {
    var_name: String,
}

impl EnvTokenProvider {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn token(&self) -> Option<String> {
        std::env::var(&self.var_name).ok().filter(|t| !t.is_empty())
    }
}
