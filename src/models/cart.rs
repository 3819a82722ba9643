use async_graphql::{InputObject, SimpleObject};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One per user in the `carts` collection, upserted on write.
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct Cart {
    #[serde(rename = "_id")]
    #[graphql(skip)]
    pub id: ObjectId,
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct CartItem {
    pub book_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, InputObject)]
pub struct CartItemData {
    pub book_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, InputObject)]
pub struct CartData {
    pub items: Vec<CartItemData>,
}

impl From<CartItemData> for CartItem {
    fn from(data: CartItemData) -> Self {
        CartItem {
            book_id: data.book_id,
            quantity: data.quantity,
        }
    }
}
