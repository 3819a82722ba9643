mod mutation;
mod objects;
mod query;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use crate::{
    middleware::AuthHeader,
    models::Identity,
    services::BookStore,
    utils::{AppError, AppResult},
};
use actix_web::{web, HttpRequest, HttpResponse};
use async_graphql::{
    http::{playground_source, GraphQLPlaygroundConfig},
    Context, EmptySubscription, ErrorExtensions, Schema,
};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

pub const GRAPHQL_PATH: &str = "/gql";

pub type BookStoreSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(store: BookStore) -> BookStoreSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

/// POST /gql - executes a GraphQL request with the caller's Authorization header attached
pub async fn graphql_handler(
    schema: web::Data<BookStoreSchema>,
    req: HttpRequest,
    gql: GraphQLRequest,
) -> GraphQLResponse {
    let request = gql.into_inner().data(AuthHeader::from_request(&req));
    schema.execute(request).await.into()
}

/// GET / - interactive query console
pub async fn playground() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(playground_source(GraphQLPlaygroundConfig::new(GRAPHQL_PATH)))
}

/// Converts service errors into GraphQL errors carrying an `extensions.code`.
pub(crate) trait IntoGraphQL<T> {
    fn gql(self) -> async_graphql::Result<T>;
}

impl<T> IntoGraphQL<T> for AppResult<T> {
    fn gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.extend())
    }
}

pub(crate) fn store<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a BookStore> {
    ctx.data::<BookStore>()
}

/// Resolves the caller from the request's Authorization header. Only
/// operations that need an identity call this, so public reads work without a token.
pub(crate) fn identity(ctx: &Context<'_>) -> async_graphql::Result<Identity> {
    let tokens = store(ctx)?.tokens();

    ctx.data_opt::<AuthHeader>()
        .cloned()
        .unwrap_or_default()
        .identity(tokens)
        .map_err(AppError::from)
        .gql()
}
