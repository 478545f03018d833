#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quizhub_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{AuthSession, Quiz, User},
    repositories::{AuthSessionRepository, QuizRepository, UserRepository},
};

pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn count(&self) -> usize {
        self.quizzes.read().await.len()
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz with id '{}' already exists",
                quiz.id
            )));
        }

        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes
            .values()
            .filter(|q| q.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        let stored_version = quizzes
            .get(&quiz.id)
            .map(|stored| stored.version)
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz.id)))?;

        if stored_version != quiz.version {
            return Err(AppError::Conflict(format!(
                "Quiz '{}' changed since version {}",
                quiz.id, quiz.version
            )));
        }

        let mut next = quiz;
        next.version += 1;
        quizzes.insert(next.id.clone(), next.clone());
        Ok(next)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.remove(id).is_none() {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct InMemoryUserRepository {
    users_by_id: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users_by_id: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users_by_id.write().await;

        let duplicate = users
            .values()
            .any(|u| u.username == user.username || u.email == user.email);
        if duplicate || users.contains_key(&user.id) {
            return Err(AppError::AlreadyExists(format!(
                "User '{}' already exists",
                user.username
            )));
        }

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let users = self.users_by_id.read().await;
        Ok(users.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users_by_id.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users_by_id.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct InMemoryAuthSessionRepository {
    sessions: Arc<RwLock<HashMap<String, AuthSession>>>,
}

impl InMemoryAuthSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl AuthSessionRepository for InMemoryAuthSessionRepository {
    async fn create(&self, session: AuthSession) -> AppResult<AuthSession> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<AuthSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn revoke(&self, id: &str) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Login session not found".to_string()))?;
        session.revoked = true;
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Application state wired to in-memory repositories. The quiz repository is
/// returned as well so tests can inspect what was persisted.
pub fn in_memory_state() -> (AppState, Arc<InMemoryQuizRepository>) {
    let quizzes = Arc::new(InMemoryQuizRepository::new());
    let state = AppState::with_repositories(
        Config::test_config(),
        Arc::new(InMemoryUserRepository::new()),
        quizzes.clone(),
        Arc::new(InMemoryAuthSessionRepository::new()),
    );
    (state, quizzes)
}
