use async_trait::async_trait;
use log::info;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::AuthSession,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthSessionRepository: Send + Sync {
    async fn create(&self, session: AuthSession) -> AppResult<AuthSession>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<AuthSession>>;
    async fn revoke(&self, id: &str) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoAuthSessionRepository {
    collection: Collection<AuthSession>,
}

impl MongoAuthSessionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl AuthSessionRepository for MongoAuthSessionRepository {
    async fn create(&self, session: AuthSession) -> AppResult<AuthSession> {
        self.collection.insert_one(&session).await?;
        Ok(session)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<AuthSession>> {
        let session = self.collection.find_one(doc! { "id": id }).await?;
        Ok(session)
    }

    async fn revoke(&self, id: &str) -> AppResult<()> {
        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$set": { "revoked": true } })
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("Login session not found".to_string()));
        }

        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let id_options = IndexOptions::builder().unique(true).build();
        let id_model = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(id_options)
            .build();
        self.collection.create_index(id_model).await?;
        info!("Created unique index on auth_sessions.id");

        let user_index = IndexModel::builder().keys(doc! { "user_id": 1 }).build();
        self.collection.create_index(user_index).await?;
        info!("Created index on auth_sessions.user_id");

        Ok(())
    }
}
