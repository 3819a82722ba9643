use crate::{
    models::{Author, Book, BookUpdate, Cart, CartItem, Review, Topic, User, WishList},
    utils::AppResult,
};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

pub const USERS: &str = "users";
pub const AUTHORS: &str = "authors";
pub const TOPICS: &str = "topics";
pub const BOOKS: &str = "books";
pub const REVIEWS: &str = "reviews";
pub const CARTS: &str = "carts";
pub const WISH_LISTS: &str = "wish-lists";

/// Storage operations behind the resolvers. Each method maps to a single
/// database call; `find_*` methods return `None` or an empty list on absence.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Round trip to the backing store.
    async fn ping(&self) -> AppResult<()>;

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn insert_user(&self, user: &User) -> AppResult<()>;

    async fn insert_author(&self, author: &Author) -> AppResult<()>;
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn find_authors(&self, ids: &[ObjectId]) -> AppResult<Vec<Author>>;
    async fn rename_author(&self, id: ObjectId, name: &str, now: i64) -> AppResult<Option<Author>>;
    async fn delete_author(&self, id: ObjectId) -> AppResult<Option<Author>>;

    async fn insert_topic(&self, topic: &Topic) -> AppResult<()>;
    async fn list_topics(&self) -> AppResult<Vec<Topic>>;
    async fn find_topics(&self, ids: &[ObjectId]) -> AppResult<Vec<Topic>>;
    async fn rename_topic(&self, id: ObjectId, name: &str, now: i64) -> AppResult<Option<Topic>>;
    async fn delete_topic(&self, id: ObjectId) -> AppResult<Option<Topic>>;

    async fn insert_book(&self, book: &Book) -> AppResult<()>;
    async fn list_books(&self) -> AppResult<Vec<Book>>;
    async fn find_book(&self, id: ObjectId) -> AppResult<Option<Book>>;
    async fn find_books(&self, ids: &[ObjectId]) -> AppResult<Vec<Book>>;
    async fn find_books_by_author(&self, author_id: &str) -> AppResult<Vec<Book>>;
    async fn find_books_by_topic(&self, topic_id: &str) -> AppResult<Vec<Book>>;
    /// Applies the scalar fields and the `adding_*` lists, returning the updated book.
    async fn set_book_fields(
        &self,
        id: ObjectId,
        update: &BookUpdate,
        now: i64,
    ) -> AppResult<Option<Book>>;
    /// Pulls the `removing_*` lists, returning the updated book.
    async fn pull_book_refs(&self, id: ObjectId, update: &BookUpdate) -> AppResult<Option<Book>>;
    async fn delete_book(&self, id: ObjectId) -> AppResult<Option<Book>>;

    async fn insert_review(&self, review: &Review) -> AppResult<()>;
    async fn find_review(&self, id: ObjectId, book_id: &str) -> AppResult<Option<Review>>;
    async fn find_reviews_by_book(&self, book_id: &str) -> AppResult<Vec<Review>>;
    async fn update_review_content(
        &self,
        id: ObjectId,
        user_id: &str,
        content: &str,
        now: i64,
    ) -> AppResult<Option<Review>>;
    async fn delete_review(&self, id: ObjectId, user_id: &str) -> AppResult<Option<Review>>;
    async fn delete_reviews_by_book(&self, book_id: &str) -> AppResult<u64>;

    async fn find_cart(&self, user_id: &str) -> AppResult<Option<Cart>>;
    /// Replaces the item list, creating the cart if the user has none.
    async fn upsert_cart_items(&self, user_id: &str, items: &[CartItem]) -> AppResult<Cart>;

    async fn find_wish_list(&self, user_id: &str) -> AppResult<Option<WishList>>;
    async fn add_to_wish_list(&self, user_id: &str, book_ids: &[String]) -> AppResult<WishList>;
    async fn pull_from_wish_list(&self, user_id: &str, book_ids: &[String])
        -> AppResult<WishList>;
}
