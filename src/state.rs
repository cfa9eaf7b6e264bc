use std::sync::Arc;

use crate::enhance::Enhancer;
use crate::llm::ImageModel;

/// Shared by every request. Holds no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub enhancer: Enhancer,
}

impl AppState {
    pub fn new(model: Arc<dyn ImageModel>, max_upload_bytes: usize) -> Self {
        Self {
            enhancer: Enhancer::new(model, max_upload_bytes),
        }
    }
}
