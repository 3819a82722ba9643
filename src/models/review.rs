use async_graphql::{InputObject, SimpleObject};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct Review {
    #[serde(rename = "_id")]
    #[graphql(skip)]
    pub id: ObjectId,
    pub content: String,
    pub book_id: String,
    /// Owner; only this user may edit or delete the review.
    pub user_id: String,
    pub created: i64,
    pub updated: i64,
}

#[derive(Debug, Clone, InputObject)]
pub struct NewReview {
    pub book_id: String,
    pub content: String,
}
