use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{is_duplicate_key, AppError, AppResult},
    models::domain::User,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        // Lookups in the service catch most duplicates; the unique indexes
        // catch registrations that race past them.
        self.collection.insert_one(&user).await.map_err(|err| {
            if is_duplicate_key(&err) {
                AppError::AlreadyExists(duplicate_user_message(&err.to_string()).to_string())
            } else {
                AppError::from(err)
            }
        })?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "id": id }).await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "username": username })
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        for field in ["id", "username", "email"] {
            let options = IndexOptions::builder().unique(true).build();
            let model = IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(options)
                .build();

            self.collection.create_index(model).await?;
            log::info!("Created unique index on users.{}", field);
        }

        Ok(())
    }
}

/// Maps a duplicate-key error to the message the register flow reports,
/// based on which unique index rejected the write.
fn duplicate_user_message(error: &str) -> &'static str {
    if error.contains("email") {
        "email exists"
    } else {
        "username exists"
    }
}
