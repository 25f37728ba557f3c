use skincart_core::{DomainError, QuizId, QuizWizard};

use crate::dto::{NewQuiz, Quiz, QuizResult, QuizSubmission};
use crate::error::ClientError;
use crate::http::{ApiClient, segment};

impl ApiClient {
    /// The quiz customers currently take.
    pub async fn active_quiz(&self) -> Result<Quiz, ClientError> {
        self.get_json("/quizzes/active").await
    }

    pub async fn list_quizzes(&self) -> Result<Vec<Quiz>, ClientError> {
        self.get_json("/quizzes").await
    }

    /// Submit a finished wizard; incomplete wizards never reach the network.
    pub async fn submit_quiz(&self, quiz_id: &QuizId, wizard: &QuizWizard) -> Result<QuizResult, ClientError> {
        let submission = QuizSubmission {
            quiz_id: quiz_id.clone(),
            answers: wizard.submission()?,
        };
        self.post_json("/quizzes/submit", &submission).await
    }

    pub async fn create_quiz(&self, quiz: &NewQuiz) -> Result<Quiz, ClientError> {
        if quiz.questions.is_empty() {
            return Err(DomainError::validation("quiz needs at least one question").into());
        }
        self.post_json("/quizzes", quiz).await
    }

    pub async fn delete_quiz(&self, id: &QuizId) -> Result<(), ClientError> {
        self.delete(&format!("/quizzes/{}", segment(id.as_str()))).await
    }
}
