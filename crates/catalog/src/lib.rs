//! Shop catalog domain module.
//!
//! Business rules for items and carts, implemented as deterministic in-memory
//! domain logic (no IO, no HTTP). [`ShopCatalog`] owns both collections and is
//! the single authority on ids, pricing and soft deletion.

pub mod cart;
pub mod catalog;
pub mod item;
pub mod query;

pub use cart::{Cart, CartLine};
pub use catalog::ShopCatalog;
pub use item::{Item, ItemPatch};
pub use query::{CartFilter, ItemFilter, Page, PriceRange, QuantityRange, DEFAULT_LIMIT};
