use serde::Deserialize;

use shop_core::{DomainError, DomainResult, Entity, ItemId, Price};

/// Catalog item. Items are never removed, only soft-deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    name: String,
    price: Price,
    deleted: bool,
}

/// Partial update: only the supplied fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub price: Option<Price>,
}

pub(crate) fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}

impl Item {
    pub(crate) fn new(id: ItemId, name: String, price: Price) -> DomainResult<Self> {
        validate_name(&name)?;
        Ok(Self {
            id,
            name,
            price,
            deleted: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Full overwrite of name and price. Permitted on deleted items; `id` and
    /// `deleted` are left alone.
    pub(crate) fn replace(&mut self, name: String, price: Price) -> DomainResult<()> {
        validate_name(&name)?;
        self.name = name;
        self.price = price;
        Ok(())
    }

    /// Apply a partial update. Rejected with `Conflict` while deleted.
    pub(crate) fn apply_patch(&mut self, patch: ItemPatch) -> DomainResult<()> {
        if self.deleted {
            return Err(DomainError::conflict(format!(
                "item {} is deleted and cannot be modified",
                self.id
            )));
        }
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        Ok(())
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
