use async_trait::async_trait;
use mongodb::{Client, Collection};
use thiserror::Error;

use crate::models::feedback_models::FeedbackSubmission;

pub const DATABASE_NAME: &str = "crm";
pub const COLLECTION_NAME: &str = "feedback";

#[derive(Error, Debug)]
#[error("insert into {collection} failed: {source}")]
pub struct StoreError {
    pub collection: &'static str,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

#[async_trait]
pub trait FeedbackStore: Send + Sync + 'static {
    async fn insert(&self, submission: &FeedbackSubmission) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct MongoFeedbackStore {
    collection: Collection<FeedbackSubmission>,
}

impl MongoFeedbackStore {
    /// The driver connects lazily, so this only fails on a malformed connection string.
    pub async fn connect(mongo_url: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(mongo_url).await?;
        let collection = client
            .database(DATABASE_NAME)
            .collection::<FeedbackSubmission>(COLLECTION_NAME);
        tracing::info!("feedback store configured for {}.{}", DATABASE_NAME, COLLECTION_NAME);
        Ok(Self { collection })
    }
}

#[async_trait]
impl FeedbackStore for MongoFeedbackStore {
    async fn insert(&self, submission: &FeedbackSubmission) -> Result<(), StoreError> {
        match self.collection.insert_one(submission).await {
            Ok(_) => {
                tracing::info!(feedback_id = %submission.feedback_id, "feedback document inserted");
                Ok(())
            }
            Err(err) => {
                tracing::warn!("error occurred while inserting feedback document {}", err);
                Err(StoreError {
                    collection: COLLECTION_NAME,
                    source: Box::new(err),
                })
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::atomic::{AtomicBool, Ordering};

    use tokio::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct FakeFeedbackStore {
        pub documents: Mutex<Vec<FeedbackSubmission>>,
        pub fail: AtomicBool,
    }

    #[async_trait]
    impl FeedbackStore for FakeFeedbackStore {
        async fn insert(&self, submission: &FeedbackSubmission) -> Result<(), StoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StoreError {
                    collection: COLLECTION_NAME,
                    source: "server selection timeout".into(),
                });
            }
            self.documents.lock().await.push(submission.clone());
            Ok(())
        }
    }
}
