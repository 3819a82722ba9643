use async_graphql::{InputObject, SimpleObject};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Topic {
    #[serde(rename = "_id")]
    #[graphql(skip)]
    pub id: ObjectId,
    pub name: String,
    pub created: i64,
    pub updated: i64,
}

#[derive(Debug, Clone, InputObject)]
pub struct NewTopic {
    pub name: String,
}
