use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult};

const APP_NAME: &str = "quizhub-server";

/// Handle to the quizhub database. Cheap to clone; clones share one pool.
#[derive(Clone)]
pub struct Database {
    client: Client,
    name: String,
}

impl Database {
    /// Connects and pings once, so a bad URI or unreachable server fails at
    /// startup rather than on the first request.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let options = client_options(&config.mongo_conn_string).await?;
        let database = Self {
            client: Client::with_options(options)?,
            name: config.mongo_db_name.clone(),
        };

        database.ping().await?;
        log::info!("Connected to MongoDB database '{}'", database.name);

        Ok(database)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client.database(&self.name).collection(collection_name)
    }

    /// Backs `/health/ready`.
    pub async fn health_check(&self) -> AppResult<()> {
        self.ping().await
    }

    async fn ping(&self) -> AppResult<()> {
        self.client
            .database(&self.name)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

async fn client_options(conn_string: &str) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(conn_string).await?;

    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.app_name = Some(APP_NAME.to_string());
    options.max_pool_size = Some(10);
    options.min_pool_size = Some(2);
    options.connect_timeout = Some(Duration::from_secs(5));
    options.server_selection_timeout = Some(Duration::from_secs(5));

    Ok(options)
}
