use shop_core::{CartId, Entity, ItemId};

use crate::item::Item;

/// Snapshot of an item inside a cart.
///
/// `name` is captured on the first add and never follows later item edits.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    item_id: ItemId,
    name: String,
    quantity: u32,
    available: bool,
}

impl CartLine {
    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn is_available(&self) -> bool {
        self.available
    }
}

/// Shopping cart with an incrementally maintained running total.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    id: CartId,
    lines: Vec<CartLine>,
    price: f64,
}

impl Cart {
    pub(crate) fn empty(id: CartId) -> Self {
        Self {
            id,
            lines: Vec::new(),
            price: 0.0,
        }
    }

    /// Lines in first-add order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of unit prices at the time each unit was added.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Add one unit of `item`, returning the line's new quantity.
    ///
    /// Callers must reject deleted items before getting here.
    pub(crate) fn add_item(&mut self, item: &Item) -> u32 {
        let item_id = item.id();
        let quantity = match self.lines.iter_mut().find(|l| l.item_id == item_id) {
            Some(line) => {
                line.quantity += 1;
                line.available = !item.is_deleted();
                line.quantity
            }
            None => {
                self.lines.push(CartLine {
                    item_id,
                    name: item.name().to_string(),
                    quantity: 1,
                    available: !item.is_deleted(),
                });
                1
            }
        };
        self.price += item.price().value();
        quantity
    }
}

impl Entity for Cart {
    type Id = CartId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
