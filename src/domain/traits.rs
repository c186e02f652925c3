use crate::domain::error::WattsonError;
use crate::domain::model::GenerationOptions;
use async_trait::async_trait;

/// Trait for upstream text-generation services
///
/// This trait provides an abstraction over the generative backends.
/// Implementations can be swapped without changing the calling code,
/// and tests substitute a recording mock.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Turn a prompt into a natural-language summary.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, WattsonError>;
}
