pub mod gemini;
pub mod media;

use async_trait::async_trait;

use crate::options::{AspectRatio, ImageSize};

pub use gemini::{GeminiClient, ImageGenerationError};

/// Everything the image service needs for one edit.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub image: Vec<u8>,
    pub mime_type: String,
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    pub image_size: ImageSize,
}

#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Returns the raw bytes of the edited image.
    async fn edit_image(&self, request: &GenerationRequest)
        -> Result<Vec<u8>, ImageGenerationError>;

    /// Asks the model about an image and returns its text reply.
    async fn describe_image(
        &self,
        image: &[u8],
        mime_type: &str,
        instruction: &str,
    ) -> Result<String, ImageGenerationError>;
}
