use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;

use shop_catalog::{
    Cart, CartFilter, Item, ItemFilter, Page, PriceRange, QuantityRange, DEFAULT_LIMIT,
};
use shop_core::{DomainResult, Entity, Price};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /item` and `PUT /item/{id}`.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub price: Price,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// Query-string flag. Accepts `true/false`, `1/0`, `yes/no` and `on/off` in
/// any letter case, which is what form encoders and Python clients send.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(de::Error::invalid_value(Unexpected::Str(&raw), &"a boolean flag")),
    }
}

#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "flag")]
    pub show_deleted: bool,
}

impl ListItemsQuery {
    pub fn into_parts(self) -> DomainResult<(ItemFilter, Page)> {
        let filter = ItemFilter {
            price: PriceRange::new(self.min_price, self.max_price)?,
            show_deleted: self.show_deleted,
        };
        Ok((filter, Page::new(self.offset, self.limit)?))
    }
}

#[derive(Debug, Deserialize)]
pub struct ListCartsQuery {
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_quantity: Option<u64>,
    pub max_quantity: Option<u64>,
}

impl ListCartsQuery {
    pub fn into_parts(self) -> DomainResult<(CartFilter, Page)> {
        let filter = CartFilter {
            price: PriceRange::new(self.min_price, self.max_price)?,
            quantity: QuantityRange::new(self.min_quantity, self.max_quantity),
        };
        Ok((filter, Page::new(self.offset, self.limit)?))
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn item_to_json(item: &Item) -> serde_json::Value {
    serde_json::json!({
        "id": item.id(),
        "name": item.name(),
        "price": item.price(),
        "deleted": item.is_deleted(),
    })
}

pub fn cart_to_json(cart: &Cart) -> serde_json::Value {
    let lines = cart
        .lines()
        .iter()
        .map(|line| {
            serde_json::json!({
                "id": line.item_id(),
                "name": line.name(),
                "quantity": line.quantity(),
                "available": line.is_available(),
            })
        })
        .collect::<Vec<_>>();

    serde_json::json!({
        "id": cart.id(),
        "items": lines,
        "price": cart.price(),
    })
}

pub fn message_json(message: &str) -> serde_json::Value {
    serde_json::json!({ "message": message })
}
