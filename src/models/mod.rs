pub mod app_state;
pub mod config;
pub mod error;
pub mod feedback_models;
