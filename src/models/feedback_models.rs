use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackForm {
    pub feedback: Option<String>,
    pub email: Option<String>,
}

/// One submission, stored as a document and copied verbatim into the queue message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub email: String,
    pub feedback: String,
    pub feedback_id: String,
}

impl FeedbackSubmission {
    pub fn new(form: FeedbackForm) -> Self {
        Self {
            email: form.email.unwrap_or_default(),
            feedback: form.feedback.unwrap_or_default(),
            feedback_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn to_queue_message(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone)]
pub struct ErrorView {
    pub request_id: String,
}

impl ErrorView {
    pub fn show_request_id(&self) -> bool {
        !self.request_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_become_empty_strings() {
        let submission = FeedbackSubmission::new(FeedbackForm::default());
        assert_eq!(submission.email, "");
        assert_eq!(submission.feedback, "");
        assert!(Uuid::parse_str(&submission.feedback_id).is_ok());
    }

    #[test]
    fn identical_content_gets_distinct_ids() {
        let form = || FeedbackForm {
            feedback: Some("Great service".to_string()),
            email: Some("a@example.com".to_string()),
        };
        let first = FeedbackSubmission::new(form());
        let second = FeedbackSubmission::new(form());
        assert_eq!(first.email, second.email);
        assert_ne!(first.feedback_id, second.feedback_id);
    }

    #[test]
    fn queue_message_keeps_field_order() {
        let submission = FeedbackSubmission {
            email: "a@example.com".to_string(),
            feedback: "Great service".to_string(),
            feedback_id: "x".to_string(),
        };
        assert_eq!(
            submission.to_queue_message().unwrap(),
            r#"{"email":"a@example.com","feedback":"Great service","feedback_id":"x"}"#
        );
    }
}
