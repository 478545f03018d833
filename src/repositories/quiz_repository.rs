use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Quiz,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Quiz>>;
    /// Replaces the stored quiz document as a whole, provided the stored
    /// version still equals `quiz.version`. Returns the quiz with its version
    /// bumped. A version mismatch is a `Conflict`.
    async fn update(&self, quiz: Quiz) -> AppResult<Quiz>;
    /// Removes the quiz together with every embedded question and option.
    async fn delete(&self, id: &str) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": 1 })
            .await?;
        let items: Vec<Quiz> = cursor.try_collect().await?;
        Ok(items)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let loaded_version = quiz.version;
        let mut next = quiz;
        next.version = loaded_version + 1;

        let result = self
            .collection
            .replace_one(doc! { "id": &next.id, "version": loaded_version }, &next)
            .await?;

        if result.matched_count == 0 {
            let exists = self
                .collection
                .count_documents(doc! { "id": &next.id })
                .await?
                > 0;

            return Err(if exists {
                AppError::Conflict(format!(
                    "Quiz '{}' changed since version {}",
                    next.id, loaded_version
                ))
            } else {
                AppError::NotFound(format!("Quiz with id '{}' not found", next.id))
            });
        }

        Ok(next)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }

        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(id_index).await?;

        let owner_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().name("user_id".to_string()).build())
            .build();
        self.collection.create_index(owner_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}
