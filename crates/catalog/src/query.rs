//! Filtering and pagination for list queries.
//!
//! Bounds are inclusive and optional; an absent bound means "no bound".

use shop_core::{DomainError, DomainResult};

use crate::cart::Cart;
use crate::item::Item;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: usize = 10;

/// Offset/limit window over an id-ordered result.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Page {
    offset: usize,
    limit: usize,
}

impl Page {
    pub fn new(offset: usize, limit: usize) -> DomainResult<Self> {
        if limit == 0 {
            return Err(DomainError::validation("limit must be greater than zero"));
        }
        Ok(Self { offset, limit })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Slice an already filtered and ordered sequence. An offset past the end
    /// yields an empty page.
    pub fn slice<T>(&self, iter: impl Iterator<Item = T>) -> Vec<T> {
        iter.skip(self.offset).take(self.limit).collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PriceRange {
    min: Option<f64>,
    max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> DomainResult<Self> {
        for (label, bound) in [("min_price", min), ("max_price", max)] {
            if let Some(v) = bound {
                if !v.is_finite() || v < 0.0 {
                    return Err(DomainError::validation(format!(
                        "{label} must be a non-negative number"
                    )));
                }
            }
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct QuantityRange {
    min: Option<u64>,
    max: Option<u64>,
}

impl QuantityRange {
    pub fn new(min: Option<u64>, max: Option<u64>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, quantity: u64) -> bool {
        self.min.is_none_or(|min| quantity >= min) && self.max.is_none_or(|max| quantity <= max)
    }
}

/// Item list filter. Deleted items are hidden unless `show_deleted` is set.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub price: PriceRange,
    pub show_deleted: bool,
}

impl ItemFilter {
    pub fn matches(&self, item: &Item) -> bool {
        self.price.contains(item.price().value()) && (self.show_deleted || !item.is_deleted())
    }
}

/// Cart list filter. Quantity bounds apply to the sum of line quantities.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CartFilter {
    pub price: PriceRange,
    pub quantity: QuantityRange,
}

impl CartFilter {
    pub fn matches(&self, cart: &Cart) -> bool {
        self.price.contains(cart.price()) && self.quantity.contains(cart.total_quantity())
    }
}
