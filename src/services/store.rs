use crate::{
    database::Repository,
    models::Identity,
    services::token_service::TokenService,
    utils::{AppError, AppResult},
};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

/// Entry point for every query and mutation. Methods take the caller's
/// identity explicitly; public reads take none.
#[derive(Clone)]
pub struct BookStore {
    pub(crate) repo: Arc<dyn Repository>,
    pub(crate) tokens: TokenService,
}

impl BookStore {
    pub fn new(repo: Arc<dyn Repository>, tokens: TokenService) -> Self {
        Self { repo, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.repo.ping().await
    }
}

pub(crate) fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub(crate) fn require_admin(identity: &Identity, action: &str) -> AppResult<()> {
    if identity.is_admin() {
        return Ok(());
    }
    log::warn!("⛔ {} denied for user {}: admin role required", action, identity.uid);
    Err(AppError::Authorization(format!("{} requires the admin role", action)))
}

pub(crate) fn parse_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::Validation(format!("Invalid ID: {}", id)))
}

/// Stored references are unchecked; ids that do not parse are skipped.
pub(crate) fn parse_refs(ids: &[String]) -> Vec<ObjectId> {
    ids.iter()
        .filter_map(|id| ObjectId::parse_str(id).ok())
        .collect()
}
