pub mod feedback_queue;
pub mod feedback_store;
pub mod http_tracing;
pub mod queue_storage;
pub mod tracing;
