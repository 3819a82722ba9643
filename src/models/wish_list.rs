use async_graphql::{InputObject, SimpleObject};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One per user in the `wish-lists` collection.
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct WishList {
    #[serde(rename = "_id")]
    #[graphql(skip)]
    pub id: ObjectId,
    pub user_id: String,
    #[serde(default)]
    pub books_id: Vec<String>,
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct WishListUpdate {
    #[graphql(default)]
    pub add: Vec<String>,
    #[graphql(default)]
    pub remove: Vec<String>,
}
