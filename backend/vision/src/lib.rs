pub mod mock;
pub mod openai;

use std::sync::Arc;

use tracing::{info, warn};

use gridscan_core::TableVision;

pub use mock::MockVision;
pub use openai::OpenAiVision;

/// Pick the vision provider from the optional API credential.
///
/// A missing credential is not a startup failure: the service degrades to
/// the fixed-grid stub so local development works without a key.
pub fn select_provider(api_key: Option<&str>, model: &str) -> Arc<dyn TableVision> {
    match api_key {
        Some(key) if !key.is_empty() => {
            info!(model = %model, "Vision provider: OpenAI");
            Arc::new(OpenAiVision::new(key).with_model(model))
        }
        _ => {
            warn!("No vision API key configured, running in mock mode");
            Arc::new(MockVision::new())
        }
    }
}
