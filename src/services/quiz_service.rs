use std::sync::Arc;

use crate::{
    auth::require_owner,
    errors::{AppError, AppResult},
    models::{
        domain::Quiz,
        dto::{quiz_dto::QuizDto, request::QuizPayload, response::MessageResponse},
    },
    repositories::QuizRepository,
    services::quiz_reconciler::QuizReconciler,
};

/// How many times an update is recomputed after losing a race with a
/// concurrent write before the caller gets a conflict.
const MAX_UPDATE_ATTEMPTS: usize = 3;

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_quiz(&self, payload: QuizPayload, user_id: &str) -> AppResult<QuizDto> {
        // The full tree is validated in memory before the single insert.
        let quiz = QuizReconciler::build_quiz(payload, user_id)?;
        let quiz = self.repository.create(quiz).await?;

        log::info!(
            "User '{}' created quiz '{}' with {} questions",
            user_id,
            quiz.id,
            quiz.questions.len()
        );
        Ok(quiz.into())
    }

    pub async fn get_quiz(&self, id: &str, requester_id: &str) -> AppResult<QuizDto> {
        let quiz = self.load_owned(id, requester_id).await?;
        Ok(quiz.into())
    }

    pub async fn list_quizzes(&self, requester_id: &str) -> AppResult<Vec<QuizDto>> {
        let quizzes = self.repository.list_by_user(requester_id).await?;
        Ok(quizzes.into_iter().map(QuizDto::from).collect())
    }

    pub async fn update_quiz(
        &self,
        id: &str,
        payload: QuizPayload,
        requester_id: &str,
    ) -> AppResult<QuizDto> {
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            // The loaded quiz is a detached copy; nothing is written unless the
            // whole payload reconciles against it.
            let mut working = self.load_owned(id, requester_id).await?;
            QuizReconciler::apply_quiz(&mut working, payload.clone())?;

            match self.repository.update(working).await {
                Ok(quiz) => return Ok(quiz.into()),
                Err(AppError::Conflict(msg)) => {
                    log::warn!(
                        "Update of quiz '{}' lost a race (attempt {}): {}",
                        id,
                        attempt,
                        msg
                    );
                }
                Err(err) => return Err(err),
            }
        }

        Err(AppError::Conflict(
            "Quiz was modified concurrently, retry the request".to_string(),
        ))
    }

    pub async fn delete_quiz(&self, id: &str, requester_id: &str) -> AppResult<MessageResponse> {
        let quiz = self.load_owned(id, requester_id).await?;
        self.repository.delete(&quiz.id).await?;

        log::info!("User '{}' deleted quiz '{}'", requester_id, quiz.id);
        Ok(MessageResponse::new("Quiz deleted"))
    }

    async fn load_owned(&self, id: &str, requester_id: &str) -> AppResult<Quiz> {
        let quiz = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        require_owner(requester_id, &quiz)?;
        Ok(quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        domain::{QuizQuestion, QuizQuestionOption},
        dto::request::QuestionPayload,
    };
    use crate::repositories::quiz_repository::MockQuizRepository;

    fn stored_quiz(owner: &str) -> Quiz {
        Quiz::new(
            owner,
            "Stored",
            vec![QuizQuestion::new("Q1", vec![QuizQuestionOption::new("A", true)])],
        )
    }

    #[tokio::test]
    async fn create_quiz_does_not_touch_repository_on_validation_failure() {
        let mut repository = MockQuizRepository::new();
        repository.expect_create().never();
        let service = QuizService::new(Arc::new(repository));

        let payload = QuizPayload {
            title: Some("T1".to_string()),
            questions: Some(vec![QuestionPayload {
                id: None,
                text: Some("Q1".to_string()),
                options: None,
            }]),
        };

        let result = service.create_quiz(payload, "user-1").await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn non_owner_is_forbidden_before_payload_is_checked() {
        let quiz = stored_quiz("user-a");
        let mut repository = MockQuizRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(quiz.clone())));
        repository.expect_update().never();
        repository.expect_delete().never();
        let service = QuizService::new(Arc::new(repository));

        // An invalid payload still yields Forbidden for a non-owner
        let invalid = QuizPayload {
            title: Some("".to_string()),
            questions: None,
        };

        assert!(matches!(
            service.get_quiz("any", "user-b").await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            service.update_quiz("any", invalid, "user-b").await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            service.delete_quiz("any", "user-b").await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn missing_quiz_is_not_found() {
        let mut repository = MockQuizRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));
        let service = QuizService::new(Arc::new(repository));

        let result = service.get_quiz("missing", "user-a").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn failed_update_is_not_persisted() {
        let quiz = stored_quiz("user-a");
        let mut repository = MockQuizRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(quiz.clone())));
        repository.expect_update().never();
        let service = QuizService::new(Arc::new(repository));

        let payload = QuizPayload {
            title: Some("Renamed".to_string()),
            questions: Some(vec![QuestionPayload {
                id: Some("unknown".to_string()),
                text: Some("x".to_string()),
                options: None,
            }]),
        };

        let result = service.update_quiz("any", payload, "user-a").await;
        assert!(matches!(result, Err(AppError::ValidationError(msg)) if msg == "Question id is invalid."));
    }

    #[tokio::test]
    async fn update_persists_reconciled_tree() {
        let quiz = stored_quiz("user-a");
        let question_id = quiz.questions[0].id.clone();
        let mut repository = MockQuizRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(quiz.clone())));
        repository
            .expect_update()
            .withf(|quiz| {
                quiz.questions[0].text == "edited" && quiz.title == "Stored" && quiz.version == 0
            })
            .times(1)
            .returning(|quiz| Ok(quiz));
        let service = QuizService::new(Arc::new(repository));

        let payload = QuizPayload {
            title: None,
            questions: Some(vec![QuestionPayload {
                id: Some(question_id),
                text: Some("edited".to_string()),
                options: None,
            }]),
        };

        let dto = service
            .update_quiz("any", payload, "user-a")
            .await
            .expect("update should succeed");
        assert_eq!(dto.questions[0].text, "edited");
        assert_eq!(dto.questions[0].options.len(), 1);
    }

    #[tokio::test]
    async fn update_recomputes_after_a_conflicting_write() {
        let quiz = stored_quiz("user-a");
        let mut repository = MockQuizRepository::new();
        repository
            .expect_find_by_id()
            .times(2)
            .returning(move |_| Ok(Some(quiz.clone())));
        let mut seq = mockall::Sequence::new();
        repository
            .expect_update()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::Conflict("stale version".to_string())));
        repository
            .expect_update()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|quiz| Ok(quiz));
        let service = QuizService::new(Arc::new(repository));

        let payload = QuizPayload {
            title: Some("Renamed".to_string()),
            questions: None,
        };

        let dto = service
            .update_quiz("any", payload, "user-a")
            .await
            .expect("second attempt should succeed");
        assert_eq!(dto.title, "Renamed");
    }

    #[tokio::test]
    async fn update_gives_up_with_conflict_after_repeated_races() {
        let quiz = stored_quiz("user-a");
        let mut repository = MockQuizRepository::new();
        repository
            .expect_find_by_id()
            .times(MAX_UPDATE_ATTEMPTS)
            .returning(move |_| Ok(Some(quiz.clone())));
        repository
            .expect_update()
            .times(MAX_UPDATE_ATTEMPTS)
            .returning(|_| Err(AppError::Conflict("stale version".to_string())));
        let service = QuizService::new(Arc::new(repository));

        let payload = QuizPayload {
            title: Some("Renamed".to_string()),
            questions: None,
        };

        let result = service.update_quiz("any", payload, "user-a").await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
