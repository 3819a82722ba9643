pub mod auth_service;
pub mod book_service;
pub mod catalog_service;
pub mod review_service;
pub mod shopping_service;
pub mod store;
pub mod token_service;

#[cfg(test)]
pub(crate) mod testing;

pub use store::BookStore;
pub use token_service::TokenService;
