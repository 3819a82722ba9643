use super::{identity, store, IntoGraphQL};
use crate::models::{Author, Book, Cart, Login, Review, Topic, WishList};
use async_graphql::{Context, Object, Result, ID};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Returns a bearer token for valid credentials.
    async fn login(&self, ctx: &Context<'_>, input: Login) -> Result<String> {
        store(ctx)?.login(input).await.gql()
    }

    async fn authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        store(ctx)?.authors().await.gql()
    }

    async fn author(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Author>> {
        store(ctx)?.author(&id).await.gql()
    }

    async fn topics(&self, ctx: &Context<'_>) -> Result<Vec<Topic>> {
        store(ctx)?.topics().await.gql()
    }

    async fn topic(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Topic>> {
        store(ctx)?.topic(&id).await.gql()
    }

    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        store(ctx)?.books().await.gql()
    }

    async fn book(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Book>> {
        store(ctx)?.book(&id).await.gql()
    }

    async fn reviews(&self, ctx: &Context<'_>, book_id: ID) -> Result<Vec<Review>> {
        store(ctx)?.reviews(&book_id).await.gql()
    }

    /// The caller's cart, or null if they never set one.
    async fn cart(&self, ctx: &Context<'_>) -> Result<Option<Cart>> {
        let identity = identity(ctx)?;
        store(ctx)?.cart(&identity).await.gql()
    }

    /// The caller's wish list, or null if they never created one.
    async fn wish_list(&self, ctx: &Context<'_>) -> Result<Option<WishList>> {
        let identity = identity(ctx)?;
        store(ctx)?.wish_list(&identity).await.gql()
    }
}
