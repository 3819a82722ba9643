//! Fields that need a lookup beyond the stored document.

use super::{store, IntoGraphQL};
use crate::models::{Author, Book, Cart, CartItem, Review, Topic, User, WishList};
use async_graphql::{ComplexObject, Context, Result, ID};

#[ComplexObject]
impl User {
    #[graphql(name = "id")]
    async fn gql_id(&self) -> ID {
        ID(self.id.to_hex())
    }
}

#[ComplexObject]
impl Author {
    #[graphql(name = "id")]
    async fn gql_id(&self) -> ID {
        ID(self.id.to_hex())
    }

    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        store(ctx)?.books_by_author(self).await.gql()
    }
}

#[ComplexObject]
impl Topic {
    #[graphql(name = "id")]
    async fn gql_id(&self) -> ID {
        ID(self.id.to_hex())
    }

    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        store(ctx)?.books_by_topic(self).await.gql()
    }
}

#[ComplexObject]
impl Book {
    #[graphql(name = "id")]
    async fn gql_id(&self) -> ID {
        ID(self.id.to_hex())
    }

    async fn topics(&self, ctx: &Context<'_>) -> Result<Vec<Topic>> {
        store(ctx)?.book_topics(self).await.gql()
    }

    async fn authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        store(ctx)?.book_authors(self).await.gql()
    }

    async fn reviews(&self, ctx: &Context<'_>) -> Result<Vec<Review>> {
        store(ctx)?.book_reviews(self).await.gql()
    }
}

#[ComplexObject]
impl Review {
    #[graphql(name = "id")]
    async fn gql_id(&self) -> ID {
        ID(self.id.to_hex())
    }

    async fn book(&self, ctx: &Context<'_>) -> Result<Option<Book>> {
        store(ctx)?.book_by_ref(&self.book_id).await.gql()
    }
}

#[ComplexObject]
impl Cart {
    #[graphql(name = "id")]
    async fn gql_id(&self) -> ID {
        ID(self.id.to_hex())
    }
}

#[ComplexObject]
impl CartItem {
    /// Null when the book has been removed.
    async fn book(&self, ctx: &Context<'_>) -> Result<Option<Book>> {
        store(ctx)?.book_by_ref(&self.book_id).await.gql()
    }
}

#[ComplexObject]
impl WishList {
    #[graphql(name = "id")]
    async fn gql_id(&self) -> ID {
        ID(self.id.to_hex())
    }

    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        store(ctx)?.wish_list_books(self).await.gql()
    }
}
