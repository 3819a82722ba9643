use crate::{
    models::{Author, Book, BookUpdate, Identity, NewBook, Review, Topic},
    services::store::{now, parse_id, parse_refs, require_admin, BookStore},
    utils::{AppError, AppResult},
};
use mongodb::bson::oid::ObjectId;

impl BookStore {
    pub async fn books(&self) -> AppResult<Vec<Book>> {
        self.repo.list_books().await
    }

    pub async fn book(&self, id: &str) -> AppResult<Option<Book>> {
        self.repo.find_book(parse_id(id)?).await
    }

    /// Resolves a stored book reference; dangling or unparsable ids yield `None`.
    pub async fn book_by_ref(&self, book_id: &str) -> AppResult<Option<Book>> {
        match ObjectId::parse_str(book_id) {
            Ok(id) => self.repo.find_book(id).await,
            Err(_) => Ok(None),
        }
    }

    pub async fn create_book(&self, identity: &Identity, input: NewBook) -> AppResult<Book> {
        require_admin(identity, "createBook")?;
        if input.price < 0.0 {
            return Err(AppError::Validation("Price must not be negative".to_string()));
        }

        let now = now();
        let book = Book {
            id: ObjectId::new(),
            name: input.name,
            price: input.price,
            content: input.content,
            topics_id: input.topics_id,
            authors_id: input.authors_id,
            created: now,
            updated: now,
        };
        self.repo.insert_book(&book).await?;

        log::info!("✅ Book {} created by {}", book.id, identity.uid);
        Ok(book)
    }

    /// Applies the patch in two steps: scalar fields and additions first, then
    /// removals. The steps are separate writes, so a concurrent update of the
    /// same book can interleave between them.
    pub async fn update_book(
        &self,
        identity: &Identity,
        id: &str,
        update: BookUpdate,
    ) -> AppResult<Book> {
        require_admin(identity, "updateBook")?;
        if update.price.is_some_and(|price| price < 0.0) {
            return Err(AppError::Validation("Price must not be negative".to_string()));
        }

        let oid = parse_id(id)?;
        let not_found = || AppError::NotFound(format!("book {}", id));

        let mut book = self
            .repo
            .set_book_fields(oid, &update, now())
            .await?
            .ok_or_else(not_found)?;

        if update.has_removals() {
            book = self
                .repo
                .pull_book_refs(oid, &update)
                .await?
                .ok_or_else(not_found)?;
        }

        log::info!("✏️ Book {} updated by {}", id, identity.uid);
        Ok(book)
    }

    /// Deletes the book and every review that points at it.
    pub async fn remove_book(&self, identity: &Identity, id: &str) -> AppResult<Book> {
        require_admin(identity, "removeBook")?;

        let book = self
            .repo
            .delete_book(parse_id(id)?)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("book {}", id)))?;
        let reviews = self.repo.delete_reviews_by_book(id).await?;

        log::info!(
            "🗑️ Book {} removed by {} ({} reviews deleted)",
            id,
            identity.uid,
            reviews
        );
        Ok(book)
    }

    pub async fn book_topics(&self, book: &Book) -> AppResult<Vec<Topic>> {
        let ids = parse_refs(&book.topics_id);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repo.find_topics(&ids).await
    }

    pub async fn book_authors(&self, book: &Book) -> AppResult<Vec<Author>> {
        let ids = parse_refs(&book.authors_id);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repo.find_authors(&ids).await
    }

    pub async fn book_reviews(&self, book: &Book) -> AppResult<Vec<Review>> {
        self.repo.find_reviews_by_book(&book.id.to_hex()).await
    }
}
