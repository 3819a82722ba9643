use super::{identity, store, IntoGraphQL};
use crate::models::{
    Author, Book, BookUpdate, Cart, CartData, NewAuthor, NewBook, NewReview, NewTopic, NewUser,
    Review, Topic, User, WishList, WishListUpdate,
};
use async_graphql::{Context, Object, Result, ID};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_user(&self, ctx: &Context<'_>, input: NewUser) -> Result<User> {
        store(ctx)?.create_user(input).await.gql()
    }

    async fn create_author(&self, ctx: &Context<'_>, input: NewAuthor) -> Result<Author> {
        let identity = identity(ctx)?;
        store(ctx)?.create_author(&identity, input).await.gql()
    }

    async fn update_author(&self, ctx: &Context<'_>, id: ID, name: String) -> Result<Author> {
        let identity = identity(ctx)?;
        store(ctx)?.update_author(&identity, &id, &name).await.gql()
    }

    async fn remove_author(&self, ctx: &Context<'_>, id: ID) -> Result<Author> {
        let identity = identity(ctx)?;
        store(ctx)?.remove_author(&identity, &id).await.gql()
    }

    async fn create_topic(&self, ctx: &Context<'_>, input: NewTopic) -> Result<Topic> {
        let identity = identity(ctx)?;
        store(ctx)?.create_topic(&identity, input).await.gql()
    }

    async fn update_topic(&self, ctx: &Context<'_>, id: ID, name: String) -> Result<Topic> {
        let identity = identity(ctx)?;
        store(ctx)?.update_topic(&identity, &id, &name).await.gql()
    }

    async fn remove_topic(&self, ctx: &Context<'_>, id: ID) -> Result<Topic> {
        let identity = identity(ctx)?;
        store(ctx)?.remove_topic(&identity, &id).await.gql()
    }

    async fn create_book(&self, ctx: &Context<'_>, input: NewBook) -> Result<Book> {
        let identity = identity(ctx)?;
        store(ctx)?.create_book(&identity, input).await.gql()
    }

    async fn update_book(&self, ctx: &Context<'_>, id: ID, update: BookUpdate) -> Result<Book> {
        let identity = identity(ctx)?;
        store(ctx)?.update_book(&identity, &id, update).await.gql()
    }

    /// Also deletes every review of the book.
    async fn remove_book(&self, ctx: &Context<'_>, id: ID) -> Result<Book> {
        let identity = identity(ctx)?;
        store(ctx)?.remove_book(&identity, &id).await.gql()
    }

    async fn create_review(&self, ctx: &Context<'_>, input: NewReview) -> Result<Review> {
        let identity = identity(ctx)?;
        store(ctx)?.create_review(&identity, input).await.gql()
    }

    async fn update_review(
        &self,
        ctx: &Context<'_>,
        book_id: ID,
        review_id: ID,
        content: String,
    ) -> Result<Review> {
        let identity = identity(ctx)?;
        store(ctx)?
            .update_review(&identity, &book_id, &review_id, &content)
            .await
            .gql()
    }

    async fn remove_review(&self, ctx: &Context<'_>, book_id: ID, review_id: ID) -> Result<Review> {
        let identity = identity(ctx)?;
        store(ctx)?
            .remove_review(&identity, &book_id, &review_id)
            .await
            .gql()
    }

    async fn set_cart(&self, ctx: &Context<'_>, input: CartData) -> Result<Cart> {
        let identity = identity(ctx)?;
        store(ctx)?.set_cart(&identity, input).await.gql()
    }

    async fn update_wish_list(
        &self,
        ctx: &Context<'_>,
        input: WishListUpdate,
    ) -> Result<Option<WishList>> {
        let identity = identity(ctx)?;
        store(ctx)?.update_wish_list(&identity, input).await.gql()
    }
}
