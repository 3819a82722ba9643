//! In-process repository with the same upsert / add-to-set / pull semantics
//! as the MongoDB queries, used by the resolver tests.

use super::Repository;
use crate::{
    models::{Author, Book, BookUpdate, Cart, CartItem, Review, Topic, User, WishList},
    utils::{AppError, AppResult},
};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    authors: Vec<Author>,
    topics: Vec<Topic>,
    books: Vec<Book>,
    reviews: Vec<Review>,
    carts: Vec<Cart>,
    wish_lists: Vec<WishList>,
}

#[derive(Default)]
pub struct MemoryRepository {
    state: Mutex<Collections>,
    offline: bool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose `ping` fails, for health reporting.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Collections) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }
}

fn add_to_set(target: &mut Vec<String>, values: &[String]) {
    for value in values {
        if !target.contains(value) {
            target.push(value.clone());
        }
    }
}

fn pull(target: &mut Vec<String>, values: &[String]) {
    target.retain(|existing| !values.contains(existing));
}

fn take<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> Option<T> {
    let index = items.iter().position(matches)?;
    Some(items.remove(index))
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn ping(&self) -> AppResult<()> {
        if self.offline {
            return Err(AppError::Database("server selection timed out".to_string()));
        }
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.with(|s| s.users.iter().find(|u| u.email == email).cloned()))
    }

    async fn insert_user(&self, user: &User) -> AppResult<()> {
        self.with(|s| {
            if s.users.iter().any(|u| u.email == user.email) {
                return Err(AppError::Validation(format!(
                    "Email {} is already registered",
                    user.email
                )));
            }
            s.users.push(user.clone());
            Ok(())
        })
    }

    async fn insert_author(&self, author: &Author) -> AppResult<()> {
        self.with(|s| s.authors.push(author.clone()));
        Ok(())
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        Ok(self.with(|s| s.authors.clone()))
    }

    async fn find_authors(&self, ids: &[ObjectId]) -> AppResult<Vec<Author>> {
        Ok(self.with(|s| {
            s.authors
                .iter()
                .filter(|a| ids.contains(&a.id))
                .cloned()
                .collect()
        }))
    }

    async fn rename_author(&self, id: ObjectId, name: &str, now: i64) -> AppResult<Option<Author>> {
        Ok(self.with(|s| {
            s.authors.iter_mut().find(|a| a.id == id).map(|a| {
                a.name = name.to_string();
                a.updated = now;
                a.clone()
            })
        }))
    }

    async fn delete_author(&self, id: ObjectId) -> AppResult<Option<Author>> {
        Ok(self.with(|s| take(&mut s.authors, |a| a.id == id)))
    }

    async fn insert_topic(&self, topic: &Topic) -> AppResult<()> {
        self.with(|s| s.topics.push(topic.clone()));
        Ok(())
    }

    async fn list_topics(&self) -> AppResult<Vec<Topic>> {
        Ok(self.with(|s| s.topics.clone()))
    }

    async fn find_topics(&self, ids: &[ObjectId]) -> AppResult<Vec<Topic>> {
        Ok(self.with(|s| {
            s.topics
                .iter()
                .filter(|t| ids.contains(&t.id))
                .cloned()
                .collect()
        }))
    }

    async fn rename_topic(&self, id: ObjectId, name: &str, now: i64) -> AppResult<Option<Topic>> {
        Ok(self.with(|s| {
            s.topics.iter_mut().find(|t| t.id == id).map(|t| {
                t.name = name.to_string();
                t.updated = now;
                t.clone()
            })
        }))
    }

    async fn delete_topic(&self, id: ObjectId) -> AppResult<Option<Topic>> {
        Ok(self.with(|s| take(&mut s.topics, |t| t.id == id)))
    }

    async fn insert_book(&self, book: &Book) -> AppResult<()> {
        self.with(|s| s.books.push(book.clone()));
        Ok(())
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.with(|s| s.books.clone()))
    }

    async fn find_book(&self, id: ObjectId) -> AppResult<Option<Book>> {
        Ok(self.with(|s| s.books.iter().find(|b| b.id == id).cloned()))
    }

    async fn find_books(&self, ids: &[ObjectId]) -> AppResult<Vec<Book>> {
        Ok(self.with(|s| {
            s.books
                .iter()
                .filter(|b| ids.contains(&b.id))
                .cloned()
                .collect()
        }))
    }

    async fn find_books_by_author(&self, author_id: &str) -> AppResult<Vec<Book>> {
        Ok(self.with(|s| {
            s.books
                .iter()
                .filter(|b| b.authors_id.iter().any(|id| id == author_id))
                .cloned()
                .collect()
        }))
    }

    async fn find_books_by_topic(&self, topic_id: &str) -> AppResult<Vec<Book>> {
        Ok(self.with(|s| {
            s.books
                .iter()
                .filter(|b| b.topics_id.iter().any(|id| id == topic_id))
                .cloned()
                .collect()
        }))
    }

    async fn set_book_fields(
        &self,
        id: ObjectId,
        update: &BookUpdate,
        now: i64,
    ) -> AppResult<Option<Book>> {
        Ok(self.with(|s| {
            s.books.iter_mut().find(|b| b.id == id).map(|book| {
                if let Some(name) = &update.name {
                    book.name = name.clone();
                }
                if let Some(content) = &update.content {
                    book.content = content.clone();
                }
                if let Some(price) = update.price {
                    book.price = price;
                }
                add_to_set(&mut book.topics_id, &update.adding_topics_id);
                add_to_set(&mut book.authors_id, &update.adding_authors_id);
                book.updated = now;
                book.clone()
            })
        }))
    }

    async fn pull_book_refs(&self, id: ObjectId, update: &BookUpdate) -> AppResult<Option<Book>> {
        Ok(self.with(|s| {
            s.books.iter_mut().find(|b| b.id == id).map(|book| {
                pull(&mut book.topics_id, &update.removing_topics_id);
                pull(&mut book.authors_id, &update.removing_authors_id);
                book.clone()
            })
        }))
    }

    async fn delete_book(&self, id: ObjectId) -> AppResult<Option<Book>> {
        Ok(self.with(|s| take(&mut s.books, |b| b.id == id)))
    }

    async fn insert_review(&self, review: &Review) -> AppResult<()> {
        self.with(|s| s.reviews.push(review.clone()));
        Ok(())
    }

    async fn find_review(&self, id: ObjectId, book_id: &str) -> AppResult<Option<Review>> {
        Ok(self.with(|s| {
            s.reviews
                .iter()
                .find(|r| r.id == id && r.book_id == book_id)
                .cloned()
        }))
    }

    async fn find_reviews_by_book(&self, book_id: &str) -> AppResult<Vec<Review>> {
        Ok(self.with(|s| {
            s.reviews
                .iter()
                .filter(|r| r.book_id == book_id)
                .cloned()
                .collect()
        }))
    }

    async fn update_review_content(
        &self,
        id: ObjectId,
        user_id: &str,
        content: &str,
        now: i64,
    ) -> AppResult<Option<Review>> {
        Ok(self.with(|s| {
            s.reviews
                .iter_mut()
                .find(|r| r.id == id && r.user_id == user_id)
                .map(|r| {
                    r.content = content.to_string();
                    r.updated = now;
                    r.clone()
                })
        }))
    }

    async fn delete_review(&self, id: ObjectId, user_id: &str) -> AppResult<Option<Review>> {
        Ok(self.with(|s| take(&mut s.reviews, |r| r.id == id && r.user_id == user_id)))
    }

    async fn delete_reviews_by_book(&self, book_id: &str) -> AppResult<u64> {
        Ok(self.with(|s| {
            let before = s.reviews.len();
            s.reviews.retain(|r| r.book_id != book_id);
            (before - s.reviews.len()) as u64
        }))
    }

    async fn find_cart(&self, user_id: &str) -> AppResult<Option<Cart>> {
        Ok(self.with(|s| s.carts.iter().find(|c| c.user_id == user_id).cloned()))
    }

    async fn upsert_cart_items(&self, user_id: &str, items: &[CartItem]) -> AppResult<Cart> {
        Ok(self.with(|s| {
            if let Some(cart) = s.carts.iter_mut().find(|c| c.user_id == user_id) {
                cart.items = items.to_vec();
                return cart.clone();
            }
            let cart = Cart {
                id: ObjectId::new(),
                user_id: user_id.to_string(),
                items: items.to_vec(),
            };
            s.carts.push(cart.clone());
            cart
        }))
    }

    async fn find_wish_list(&self, user_id: &str) -> AppResult<Option<WishList>> {
        Ok(self.with(|s| s.wish_lists.iter().find(|w| w.user_id == user_id).cloned()))
    }

    async fn add_to_wish_list(&self, user_id: &str, book_ids: &[String]) -> AppResult<WishList> {
        Ok(self.with(|s| {
            let wish_list = upsert_wish_list(&mut s.wish_lists, user_id);
            add_to_set(&mut wish_list.books_id, book_ids);
            wish_list.clone()
        }))
    }

    async fn pull_from_wish_list(
        &self,
        user_id: &str,
        book_ids: &[String],
    ) -> AppResult<WishList> {
        Ok(self.with(|s| {
            let wish_list = upsert_wish_list(&mut s.wish_lists, user_id);
            pull(&mut wish_list.books_id, book_ids);
            wish_list.clone()
        }))
    }
}

fn upsert_wish_list<'a>(wish_lists: &'a mut Vec<WishList>, user_id: &str) -> &'a mut WishList {
    if let Some(index) = wish_lists.iter().position(|w| w.user_id == user_id) {
        return &mut wish_lists[index];
    }
    wish_lists.push(WishList {
        id: ObjectId::new(),
        user_id: user_id.to_string(),
        books_id: Vec::new(),
    });
    let last = wish_lists.len() - 1;
    &mut wish_lists[last]
}
