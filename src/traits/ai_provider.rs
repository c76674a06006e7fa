use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use crate::enums::ai_provider_error::AiProviderError;
use crate::structs::stream_item::StreamItem;

pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<StreamItem, AiProviderError>> + Send>>;

#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Opens one streaming completion and yields its fragments in arrival
    /// order. Errors before the first fragment mean the call never
    /// started; errors inside the stream end it.
    async fn stream_chat(
        &self,
        system_prompt: String,
        user_prompt: String,
    ) -> Result<FragmentStream, AiProviderError>;
}
