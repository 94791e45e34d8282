//! Store API authentication seam

use async_trait::async_trait;
use bookslot_domain::Result;

/// Supplies the bearer token presented to the store API.
///
/// The deployment hands us a ready token via configuration; a
/// service-account token exchange can slot in behind this trait without
/// touching the client.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

/// Fixed token from configuration.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}
