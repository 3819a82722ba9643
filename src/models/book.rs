use async_graphql::{InputObject, SimpleObject};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Stored in the `books` collection. Topic and author references are hex ids
/// and are not checked against their collections.
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct Book {
    #[serde(rename = "_id")]
    #[graphql(skip)]
    pub id: ObjectId,
    pub name: String,
    pub price: f64,
    pub content: String,
    #[serde(default)]
    pub topics_id: Vec<String>,
    #[serde(default)]
    pub authors_id: Vec<String>,
    pub created: i64,
    pub updated: i64,
}

#[derive(Debug, Clone, InputObject)]
pub struct NewBook {
    pub name: String,
    pub price: f64,
    pub content: String,
    #[graphql(default)]
    pub topics_id: Vec<String>,
    #[graphql(default)]
    pub authors_id: Vec<String>,
}

/// Field-level patch. Scalars are `$set`, `adding_*` lists are added to the
/// set and `removing_*` lists are pulled in a second step.
#[derive(Debug, Clone, Default, InputObject)]
pub struct BookUpdate {
    pub name: Option<String>,
    pub content: Option<String>,
    pub price: Option<f64>,
    #[graphql(default)]
    pub adding_topics_id: Vec<String>,
    #[graphql(default)]
    pub adding_authors_id: Vec<String>,
    #[graphql(default)]
    pub removing_topics_id: Vec<String>,
    #[graphql(default)]
    pub removing_authors_id: Vec<String>,
}

impl BookUpdate {
    pub fn has_removals(&self) -> bool {
        !self.removing_topics_id.is_empty() || !self.removing_authors_id.is_empty()
    }
}
