use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ItemId);

/// Server-owned item. The `id` is assigned remotely and only ever echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub is_offer: bool,
}

impl Item {
    /// Price rendered the way the list shows it, e.g. `$9.99`.
    pub fn price_display(&self) -> String {
        format!("${:.2}", self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_item_with_missing_optional_fields() {
        let item: Item =
            serde_json::from_str(r#"{"id":5,"name":"Widget","price":9.99}"#).expect("item");
        assert_eq!(item.id, ItemId(5));
        assert_eq!(item.description, None);
        assert!(!item.is_offer);
    }

    #[test]
    fn id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&ItemId(42)).expect("json");
        assert_eq!(json, "42");
    }

    #[test]
    fn price_display_uses_two_decimals() {
        let item = Item {
            id: ItemId(1),
            name: "Lamp".into(),
            description: None,
            price: 3.5,
            is_offer: false,
        };
        assert_eq!(item.price_display(), "$3.50");
    }
}
