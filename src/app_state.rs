use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AuthSessionRepository, MongoAuthSessionRepository, MongoQuizRepository,
        MongoUserRepository, QuizRepository, UserRepository,
    },
    services::{
        quiz_service::QuizService, session_registry::SessionRegistry, user_service::UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub quiz_service: Arc<QuizService>,
    pub session_registry: Arc<SessionRegistry>,
    pub config: Arc<Config>,
    /// `None` when the state was assembled from non-Mongo repositories.
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db, &config.users_collection));
        user_repository.ensure_indexes().await?;

        let quiz_repository =
            Arc::new(MongoQuizRepository::new(&db, &config.quizzes_collection));
        quiz_repository.ensure_indexes().await?;

        let session_repository = Arc::new(MongoAuthSessionRepository::new(
            &db,
            &config.sessions_collection,
        ));
        session_repository.ensure_indexes().await?;

        let mut state = Self::with_repositories(
            config,
            user_repository,
            quiz_repository,
            session_repository,
        );
        state.db = Some(db);
        Ok(state)
    }

    pub fn with_repositories(
        config: Config,
        users: Arc<dyn UserRepository>,
        quizzes: Arc<dyn QuizRepository>,
        sessions: Arc<dyn AuthSessionRepository>,
    ) -> Self {
        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

        Self {
            user_service: Arc::new(UserService::new(users, sessions, jwt_service)),
            quiz_service: Arc::new(QuizService::new(quizzes)),
            session_registry: Arc::new(SessionRegistry::new()),
            config: Arc::new(config),
            db: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{
        auth_session_repository::MockAuthSessionRepository, quiz_repository::MockQuizRepository,
        user_repository::MockUserRepository,
    };

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_with_repositories_has_no_database() {
        let state = AppState::with_repositories(
            Config::test_config(),
            Arc::new(MockUserRepository::new()),
            Arc::new(MockQuizRepository::new()),
            Arc::new(MockAuthSessionRepository::new()),
        );

        assert!(state.db.is_none());
        assert_eq!(state.config.mongo_db_name, "quizhub-test");
    }
}
