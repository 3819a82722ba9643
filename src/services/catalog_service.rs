use crate::{
    models::{Author, Book, Identity, NewAuthor, NewTopic, Topic},
    services::store::{now, parse_id, require_admin, BookStore},
    utils::{AppError, AppResult},
};
use mongodb::bson::oid::ObjectId;

impl BookStore {
    // ==================== AUTHORS ====================

    pub async fn authors(&self) -> AppResult<Vec<Author>> {
        self.repo.list_authors().await
    }

    pub async fn author(&self, id: &str) -> AppResult<Option<Author>> {
        let id = parse_id(id)?;
        Ok(self.repo.find_authors(&[id]).await?.into_iter().next())
    }

    pub async fn create_author(&self, identity: &Identity, input: NewAuthor) -> AppResult<Author> {
        require_admin(identity, "createAuthor")?;

        let now = now();
        let author = Author {
            id: ObjectId::new(),
            name: input.name,
            created: now,
            updated: now,
        };
        self.repo.insert_author(&author).await?;

        log::info!("✅ Author {} created by {}", author.id, identity.uid);
        Ok(author)
    }

    pub async fn update_author(&self, identity: &Identity, id: &str, name: &str) -> AppResult<Author> {
        require_admin(identity, "updateAuthor")?;
        let author = self
            .repo
            .rename_author(parse_id(id)?, name, now())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("author {}", id)))?;

        log::info!("✏️ Author {} renamed by {}", id, identity.uid);
        Ok(author)
    }

    pub async fn remove_author(&self, identity: &Identity, id: &str) -> AppResult<Author> {
        require_admin(identity, "removeAuthor")?;
        let author = self
            .repo
            .delete_author(parse_id(id)?)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("author {}", id)))?;

        log::info!("🗑️ Author {} removed by {}", id, identity.uid);
        Ok(author)
    }

    pub async fn books_by_author(&self, author: &Author) -> AppResult<Vec<Book>> {
        self.repo.find_books_by_author(&author.id.to_hex()).await
    }

    // ==================== TOPICS ====================

    pub async fn topics(&self) -> AppResult<Vec<Topic>> {
        self.repo.list_topics().await
    }

    pub async fn topic(&self, id: &str) -> AppResult<Option<Topic>> {
        let id = parse_id(id)?;
        Ok(self.repo.find_topics(&[id]).await?.into_iter().next())
    }

    pub async fn create_topic(&self, identity: &Identity, input: NewTopic) -> AppResult<Topic> {
        require_admin(identity, "createTopic")?;

        let now = now();
        let topic = Topic {
            id: ObjectId::new(),
            name: input.name,
            created: now,
            updated: now,
        };
        self.repo.insert_topic(&topic).await?;

        log::info!("✅ Topic {} created by {}", topic.id, identity.uid);
        Ok(topic)
    }

    pub async fn update_topic(&self, identity: &Identity, id: &str, name: &str) -> AppResult<Topic> {
        require_admin(identity, "updateTopic")?;
        let topic = self
            .repo
            .rename_topic(parse_id(id)?, name, now())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("topic {}", id)))?;

        log::info!("✏️ Topic {} renamed by {}", id, identity.uid);
        Ok(topic)
    }

    pub async fn remove_topic(&self, identity: &Identity, id: &str) -> AppResult<Topic> {
        require_admin(identity, "removeTopic")?;
        let topic = self
            .repo
            .delete_topic(parse_id(id)?)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("topic {}", id)))?;

        log::info!("🗑️ Topic {} removed by {}", id, identity.uid);
        Ok(topic)
    }

    pub async fn books_by_topic(&self, topic: &Topic) -> AppResult<Vec<Book>> {
        self.repo.find_books_by_topic(&topic.id.to_hex()).await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{NewAuthor, NewBook, NewTopic};
    use crate::services::testing::{admin, regular, store};
    use crate::utils::AppError;
    use std::sync::{Mutex, Once};

    struct CapturingLogger {
        lines: Mutex<Vec<String>>,
    }

    impl log::Log for CapturingLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Info
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                self.lines.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CapturingLogger = CapturingLogger {
        lines: Mutex::new(Vec::new()),
    };
    static INIT: Once = Once::new();

    fn captured(needle: &str) -> bool {
        INIT.call_once(|| {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(log::LevelFilter::Info);
        });
        LOGGER.lines.lock().unwrap().iter().any(|line| line.contains(needle))
    }

    #[tokio::test]
    async fn only_admins_create_authors_and_topics() {
        let store = store();

        let denied = store
            .create_author(&regular(), NewAuthor { name: "Tolkien".to_string() })
            .await;
        assert!(matches!(denied, Err(AppError::Authorization(_))));

        let denied = store
            .create_topic(&regular(), NewTopic { name: "Fantasy".to_string() })
            .await;
        assert!(matches!(denied, Err(AppError::Authorization(_))));

        let author = store
            .create_author(&admin(), NewAuthor { name: "Tolkien".to_string() })
            .await
            .unwrap();
        let topic = store
            .create_topic(&admin(), NewTopic { name: "Fantasy".to_string() })
            .await
            .unwrap();

        assert_eq!(store.authors().await.unwrap().len(), 1);
        assert_eq!(store.topics().await.unwrap().len(), 1);
        assert_eq!(author.created, author.updated);
        assert_eq!(topic.name, "Fantasy");
    }

    #[tokio::test]
    async fn renames_are_logged_with_acting_user() {
        captured("");
        let store = store();
        let author = store
            .create_author(&admin(), NewAuthor { name: "Tolkien".to_string() })
            .await
            .unwrap();
        let topic = store
            .create_topic(&admin(), NewTopic { name: "Fantasy".to_string() })
            .await
            .unwrap();

        let author_id = author.id.to_hex();
        let topic_id = topic.id.to_hex();
        store.update_author(&admin(), &author_id, "J.R.R. Tolkien").await.unwrap();
        store.update_topic(&admin(), &topic_id, "High Fantasy").await.unwrap();

        assert!(captured(&format!("Author {} renamed by admin-1", author_id)));
        assert!(captured(&format!("Topic {} renamed by admin-1", topic_id)));
    }

    #[tokio::test]
    async fn rename_and_remove_topic() {
        let store = store();
        let topic = store
            .create_topic(&admin(), NewTopic { name: "Fantasy".to_string() })
            .await
            .unwrap();
        let id = topic.id.to_hex();

        let renamed = store.update_topic(&admin(), &id, "High Fantasy").await.unwrap();
        assert_eq!(renamed.name, "High Fantasy");

        let removed = store.remove_topic(&admin(), &id).await.unwrap();
        assert_eq!(removed.id, topic.id);
        assert!(store.topic(&id).await.unwrap().is_none());

        let missing = store.remove_topic(&admin(), &id).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let malformed = store.update_topic(&admin(), "not-an-id", "x").await;
        assert!(matches!(malformed, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn author_books_follow_references() {
        let store = store();
        let author = store
            .create_author(&admin(), NewAuthor { name: "Le Guin".to_string() })
            .await
            .unwrap();
        store
            .create_book(
                &admin(),
                NewBook {
                    name: "A Wizard of Earthsea".to_string(),
                    price: 9.5,
                    content: "...".to_string(),
                    topics_id: vec![],
                    authors_id: vec![author.id.to_hex()],
                },
            )
            .await
            .unwrap();
        store
            .create_book(
                &admin(),
                NewBook {
                    name: "Anonymous".to_string(),
                    price: 1.0,
                    content: "...".to_string(),
                    topics_id: vec![],
                    authors_id: vec![],
                },
            )
            .await
            .unwrap();

        let books = store.books_by_author(&author).await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "A Wizard of Earthsea");
    }
}
