use async_trait::async_trait;

use crate::domain::DomainError;

/// Sends one prompt to a text-completion provider and returns the raw text.
///
/// Implementors own transport, credentials and vendor-specific payloads.
/// Any failure to obtain text (network, non-2xx, timeout, undecodable
/// envelope) is a [`DomainError::ProviderError`]; the returned text itself is
/// not inspected here.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
