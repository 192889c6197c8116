use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::services::queue_storage::{QueueBackend, QueueError};

pub const FEEDBACK_QUEUE_NAME: &str = "feedbackqueue";

/// Queue handle shared by all requests. The queue is created on first use and
/// the create call is skipped for the rest of the process once it succeeds.
#[derive(Clone)]
pub struct FeedbackQueue {
    backend: Arc<dyn QueueBackend>,
    name: &'static str,
    ensured: Arc<OnceCell<()>>,
}

impl FeedbackQueue {
    pub fn new(backend: Arc<dyn QueueBackend>) -> Self {
        Self {
            backend,
            name: FEEDBACK_QUEUE_NAME,
            ensured: Arc::new(OnceCell::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    async fn ensure_exists(&self) -> Result<(), QueueError> {
        self.ensured
            .get_or_try_init(|| async {
                tracing::info!("ensuring queue {} exists", self.name);
                self.backend.create_if_not_exists(self.name).await
            })
            .await?;
        Ok(())
    }

    /// Creates the queue first if this process has not done so yet.
    pub async fn send(&self, message: &str) -> Result<(), QueueError> {
        self.ensure_exists().await?;
        self.backend.send_message(self.name, message).await
    }
}
