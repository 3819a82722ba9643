use super::{
    repository::{AUTHORS, BOOKS, CARTS, REVIEWS, TOPICS, USERS, WISH_LISTS},
    MongoDB, Repository,
};
use crate::{
    models::{Author, Book, BookUpdate, Cart, CartItem, Review, Topic, User, WishList},
    utils::{AppError, AppResult},
};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::{ErrorKind, WriteFailure},
    options::ReturnDocument,
    Cursor,
};
use serde::de::DeserializeOwned;

const DUPLICATE_KEY: i32 = 11000;

async fn collect<T>(cursor: Cursor<T>) -> AppResult<Vec<T>>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    Ok(cursor.try_collect().await?)
}

fn upserted<T>(doc: Option<T>, collection: &str) -> AppResult<T> {
    doc.ok_or_else(|| AppError::Database(format!("upsert into {} returned no document", collection)))
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY
    )
}

/// Scalar fields and reference additions of a book patch, as one update document.
fn book_changes(update: &BookUpdate, now: i64) -> Document {
    let mut set = doc! { "updated": now };
    if let Some(name) = &update.name {
        set.insert("name", name.as_str());
    }
    if let Some(content) = &update.content {
        set.insert("content", content.as_str());
    }
    if let Some(price) = update.price {
        set.insert("price", price);
    }

    let mut add_to_set = Document::new();
    if !update.adding_topics_id.is_empty() {
        add_to_set.insert("topicsId", doc! { "$each": update.adding_topics_id.clone() });
    }
    if !update.adding_authors_id.is_empty() {
        add_to_set.insert("authorsId", doc! { "$each": update.adding_authors_id.clone() });
    }

    let mut changes = doc! { "$set": set };
    if !add_to_set.is_empty() {
        changes.insert("$addToSet", add_to_set);
    }
    changes
}

/// Reference removals of a book patch.
fn book_removals(update: &BookUpdate) -> Document {
    let mut pull = Document::new();
    if !update.removing_topics_id.is_empty() {
        pull.insert("topicsId", doc! { "$in": update.removing_topics_id.clone() });
    }
    if !update.removing_authors_id.is_empty() {
        pull.insert("authorsId", doc! { "$in": update.removing_authors_id.clone() });
    }
    doc! { "$pull": pull }
}

fn cart_replacement(items: &[CartItem]) -> Document {
    let items: Vec<Document> = items
        .iter()
        .map(|item| doc! { "bookId": item.book_id.as_str(), "quantity": item.quantity })
        .collect();
    doc! { "$set": { "items": items } }
}

#[async_trait]
impl Repository for MongoDB {
    async fn ping(&self) -> AppResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .collection::<User>(USERS)
            .find_one(doc! { "email": email })
            .await?)
    }

    async fn insert_user(&self, user: &User) -> AppResult<()> {
        match self.collection::<User>(USERS).insert_one(user).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(AppError::Validation(format!(
                "Email {} is already registered",
                user.email
            ))),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert_author(&self, author: &Author) -> AppResult<()> {
        self.collection::<Author>(AUTHORS).insert_one(author).await?;
        Ok(())
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        collect(self.collection::<Author>(AUTHORS).find(doc! {}).await?).await
    }

    async fn find_authors(&self, ids: &[ObjectId]) -> AppResult<Vec<Author>> {
        let filter = doc! { "_id": { "$in": ids.to_vec() } };
        collect(self.collection::<Author>(AUTHORS).find(filter).await?).await
    }

    async fn rename_author(&self, id: ObjectId, name: &str, now: i64) -> AppResult<Option<Author>> {
        Ok(self
            .collection::<Author>(AUTHORS)
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": { "name": name, "updated": now } },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_author(&self, id: ObjectId) -> AppResult<Option<Author>> {
        Ok(self
            .collection::<Author>(AUTHORS)
            .find_one_and_delete(doc! { "_id": id })
            .await?)
    }

    async fn insert_topic(&self, topic: &Topic) -> AppResult<()> {
        self.collection::<Topic>(TOPICS).insert_one(topic).await?;
        Ok(())
    }

    async fn list_topics(&self) -> AppResult<Vec<Topic>> {
        collect(self.collection::<Topic>(TOPICS).find(doc! {}).await?).await
    }

    async fn find_topics(&self, ids: &[ObjectId]) -> AppResult<Vec<Topic>> {
        let filter = doc! { "_id": { "$in": ids.to_vec() } };
        collect(self.collection::<Topic>(TOPICS).find(filter).await?).await
    }

    async fn rename_topic(&self, id: ObjectId, name: &str, now: i64) -> AppResult<Option<Topic>> {
        Ok(self
            .collection::<Topic>(TOPICS)
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": { "name": name, "updated": now } },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_topic(&self, id: ObjectId) -> AppResult<Option<Topic>> {
        Ok(self
            .collection::<Topic>(TOPICS)
            .find_one_and_delete(doc! { "_id": id })
            .await?)
    }

    async fn insert_book(&self, book: &Book) -> AppResult<()> {
        self.collection::<Book>(BOOKS).insert_one(book).await?;
        Ok(())
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        collect(self.collection::<Book>(BOOKS).find(doc! {}).await?).await
    }

    async fn find_book(&self, id: ObjectId) -> AppResult<Option<Book>> {
        Ok(self
            .collection::<Book>(BOOKS)
            .find_one(doc! { "_id": id })
            .await?)
    }

    async fn find_books(&self, ids: &[ObjectId]) -> AppResult<Vec<Book>> {
        let filter = doc! { "_id": { "$in": ids.to_vec() } };
        collect(self.collection::<Book>(BOOKS).find(filter).await?).await
    }

    async fn find_books_by_author(&self, author_id: &str) -> AppResult<Vec<Book>> {
        let filter = doc! { "authorsId": { "$all": [author_id] } };
        collect(self.collection::<Book>(BOOKS).find(filter).await?).await
    }

    async fn find_books_by_topic(&self, topic_id: &str) -> AppResult<Vec<Book>> {
        let filter = doc! { "topicsId": { "$all": [topic_id] } };
        collect(self.collection::<Book>(BOOKS).find(filter).await?).await
    }

    async fn set_book_fields(
        &self,
        id: ObjectId,
        update: &BookUpdate,
        now: i64,
    ) -> AppResult<Option<Book>> {
        Ok(self
            .collection::<Book>(BOOKS)
            .find_one_and_update(doc! { "_id": id }, book_changes(update, now))
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn pull_book_refs(&self, id: ObjectId, update: &BookUpdate) -> AppResult<Option<Book>> {
        Ok(self
            .collection::<Book>(BOOKS)
            .find_one_and_update(doc! { "_id": id }, book_removals(update))
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_book(&self, id: ObjectId) -> AppResult<Option<Book>> {
        Ok(self
            .collection::<Book>(BOOKS)
            .find_one_and_delete(doc! { "_id": id })
            .await?)
    }

    async fn insert_review(&self, review: &Review) -> AppResult<()> {
        self.collection::<Review>(REVIEWS).insert_one(review).await?;
        Ok(())
    }

    async fn find_review(&self, id: ObjectId, book_id: &str) -> AppResult<Option<Review>> {
        Ok(self
            .collection::<Review>(REVIEWS)
            .find_one(doc! { "_id": id, "bookId": book_id })
            .await?)
    }

    async fn find_reviews_by_book(&self, book_id: &str) -> AppResult<Vec<Review>> {
        collect(
            self.collection::<Review>(REVIEWS)
                .find(doc! { "bookId": book_id })
                .await?,
        )
        .await
    }

    async fn update_review_content(
        &self,
        id: ObjectId,
        user_id: &str,
        content: &str,
        now: i64,
    ) -> AppResult<Option<Review>> {
        Ok(self
            .collection::<Review>(REVIEWS)
            .find_one_and_update(
                doc! { "_id": id, "userId": user_id },
                doc! { "$set": { "content": content, "updated": now } },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_review(&self, id: ObjectId, user_id: &str) -> AppResult<Option<Review>> {
        Ok(self
            .collection::<Review>(REVIEWS)
            .find_one_and_delete(doc! { "_id": id, "userId": user_id })
            .await?)
    }

    async fn delete_reviews_by_book(&self, book_id: &str) -> AppResult<u64> {
        let result = self
            .collection::<Review>(REVIEWS)
            .delete_many(doc! { "bookId": book_id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn find_cart(&self, user_id: &str) -> AppResult<Option<Cart>> {
        Ok(self
            .collection::<Cart>(CARTS)
            .find_one(doc! { "userId": user_id })
            .await?)
    }

    async fn upsert_cart_items(&self, user_id: &str, items: &[CartItem]) -> AppResult<Cart> {
        let cart = self
            .collection::<Cart>(CARTS)
            .find_one_and_update(doc! { "userId": user_id }, cart_replacement(items))
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;
        upserted(cart, CARTS)
    }

    async fn find_wish_list(&self, user_id: &str) -> AppResult<Option<WishList>> {
        Ok(self
            .collection::<WishList>(WISH_LISTS)
            .find_one(doc! { "userId": user_id })
            .await?)
    }

    async fn add_to_wish_list(&self, user_id: &str, book_ids: &[String]) -> AppResult<WishList> {
        let wish_list = self
            .collection::<WishList>(WISH_LISTS)
            .find_one_and_update(
                doc! { "userId": user_id },
                doc! { "$addToSet": { "booksId": { "$each": book_ids.to_vec() } } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;
        upserted(wish_list, WISH_LISTS)
    }

    async fn pull_from_wish_list(
        &self,
        user_id: &str,
        book_ids: &[String],
    ) -> AppResult<WishList> {
        let wish_list = self
            .collection::<WishList>(WISH_LISTS)
            .find_one_and_update(
                doc! { "userId": user_id },
                doc! { "$pull": { "booksId": { "$in": book_ids.to_vec() } } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;
        upserted(wish_list, WISH_LISTS)
    }
}
