mod storage;

pub use storage::SessionStorage;

use crate::Result;
use async_trait::async_trait;

/// Persistent holder of the bearer token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get_token(&self) -> Result<Option<String>>;

    async fn set_token(&self, token: &str) -> Result<()>;

    async fn clear_token(&self) -> Result<()>;
}
