use crate::{
    database::memory::MemoryRepository,
    models::{Identity, Role},
    services::{store::BookStore, token_service::TokenService},
};
use std::sync::Arc;

pub fn store() -> BookStore {
    BookStore::new(
        Arc::new(MemoryRepository::new()),
        TokenService::new("test-secret", 1),
    )
}

pub fn admin() -> Identity {
    Identity {
        uid: "admin-1".to_string(),
        email: "admin@example.com".to_string(),
        role: Role::Admin,
    }
}

pub fn regular() -> Identity {
    Identity {
        uid: "reader-1".to_string(),
        email: "reader@example.com".to_string(),
        role: Role::Regular,
    }
}
