use crate::error::Result;
use async_trait::async_trait;

// =============================================================================
// TextModel Trait
// =============================================================================

/// A model that turns a single prompt into a single text reply.
#[async_trait]
pub trait TextModel: Send + Sync {
    fn model(&self) -> &str;
    async fn complete(&self, prompt: &str) -> Result<String>;
}
