use serde::{Deserialize, Serialize};

use crate::domain::ItemId;

/// Body of create and update requests: an item minus its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub is_offer: bool,
}

/// Collection endpoint. The trailing slash is part of the contract.
pub fn items_route() -> &'static str {
    "/items/"
}

pub fn item_route(id: ItemId) -> String {
    format!("/items/{}", id.0)
}
