use skincart_core::ProductId;

use crate::dto::{Feedback, FeedbackQuery, NewFeedback};
use crate::error::ClientError;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn product_feedback(&self, product_id: &ProductId) -> Result<Vec<Feedback>, ClientError> {
        self.get_json_query("/feedback", &FeedbackQuery { product_id }).await
    }

    pub async fn submit_feedback(&self, feedback: &NewFeedback) -> Result<Feedback, ClientError> {
        feedback.validate()?;
        self.post_json("/feedback", feedback).await
    }
}
