use std::sync::Arc;

use crate::services::feedback_queue::FeedbackQueue;
use crate::services::feedback_store::FeedbackStore;

#[derive(Clone)]
pub struct AppState {
    pub feedback_store: Arc<dyn FeedbackStore>,
    pub feedback_queue: FeedbackQueue,
    pub speech: SpeechSettings,
}

/// Handed to the page for the client-side speech SDK; never used server side.
#[derive(Debug, Clone)]
pub struct SpeechSettings {
    pub key: String,
    pub region: String,
}
