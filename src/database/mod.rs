pub mod mongo;
pub mod repository;

#[cfg(test)]
pub mod memory;

pub use repository::Repository;

use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, IndexOptions},
    Client, Collection, Database, IndexModel,
};
use std::error::Error;
use std::time::Duration;

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.app_name = Some("book-store".to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        db.run_command(doc! { "ping": 1 }).await?;

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Creates the lookup and uniqueness indexes. Failures are logged, not fatal.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let indexes: [(&str, Document, bool); 6] = [
            (repository::USERS, doc! { "email": 1 }, true),
            (repository::CARTS, doc! { "userId": 1 }, true),
            (repository::WISH_LISTS, doc! { "userId": 1 }, true),
            (repository::REVIEWS, doc! { "bookId": 1 }, false),
            (repository::BOOKS, doc! { "authorsId": 1 }, false),
            (repository::BOOKS, doc! { "topicsId": 1 }, false),
        ];

        for (collection, keys, unique) in indexes {
            let description = format!("{}({})", collection, keys);
            let index = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(unique).build())
                .build();

            match self.collection::<Document>(collection).create_index(index).await {
                Ok(_) => log::info!("   ✅ Index ready: {}", description),
                Err(e) => log::debug!("   ℹ️  Index not created {}: {}", description, e),
            }
        }
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
