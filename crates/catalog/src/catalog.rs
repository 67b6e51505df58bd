//! In-memory store for items and carts.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use shop_core::{CartId, DomainError, DomainResult, ItemId, Price};

use crate::cart::Cart;
use crate::item::{Item, ItemPatch};
use crate::query::{CartFilter, ItemFilter, Page};

#[derive(Debug)]
struct CatalogState {
    items: BTreeMap<ItemId, Item>,
    carts: BTreeMap<CartId, Cart>,
    next_item_id: ItemId,
    next_cart_id: CartId,
}

/// Owner of the item and cart collections.
///
/// A single lock guards both collections and both id counters, taken once per
/// operation, so each call is atomic to concurrent callers. Reads return owned
/// copies.
#[derive(Debug)]
pub struct ShopCatalog {
    state: RwLock<CatalogState>,
}

impl ShopCatalog {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CatalogState {
                items: BTreeMap::new(),
                carts: BTreeMap::new(),
                next_item_id: ItemId::FIRST,
                next_cart_id: CartId::FIRST,
            }),
        }
    }

    // Every mutation validates before touching state, so a poisoned lock still
    // guards a consistent snapshot.
    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create_item(&self, name: impl Into<String>, price: Price) -> DomainResult<Item> {
        let mut state = self.write();
        let id = state.next_item_id;
        let item = Item::new(id, name.into(), price)?;

        state.next_item_id = id.next();
        state.items.insert(id, item.clone());
        tracing::debug!(item_id = %id, price = %price, "item created");
        Ok(item)
    }

    /// Deleted items are invisible here.
    pub fn get_item(&self, id: ItemId) -> DomainResult<Item> {
        let state = self.read();
        match state.items.get(&id) {
            Some(item) if !item.is_deleted() => Ok(item.clone()),
            Some(_) => Err(DomainError::not_found(format!("item {id} is deleted"))),
            None => Err(item_missing(id)),
        }
    }

    pub fn list_items(&self, filter: &ItemFilter, page: Page) -> Vec<Item> {
        let state = self.read();
        let items = page.slice(state.items.values().filter(|i| filter.matches(i)).cloned());
        tracing::debug!(offset = page.offset(), limit = page.limit(), returned = items.len(), "items listed");
        items
    }

    /// Overwrite name and price of an existing item. Never creates; works on
    /// deleted items too.
    pub fn replace_item(&self, id: ItemId, name: impl Into<String>, price: Price) -> DomainResult<Item> {
        let mut state = self.write();
        let item = state.items.get_mut(&id).ok_or_else(|| item_missing(id))?;
        item.replace(name.into(), price)?;
        tracing::debug!(item_id = %id, price = %price, "item replaced");
        Ok(item.clone())
    }

    /// Apply only the supplied fields. `Conflict` while the item is deleted.
    pub fn update_item(&self, id: ItemId, patch: ItemPatch) -> DomainResult<Item> {
        let mut state = self.write();
        let item = state.items.get_mut(&id).ok_or_else(|| item_missing(id))?;
        item.apply_patch(patch)?;
        tracing::debug!(item_id = %id, "item updated");
        Ok(item.clone())
    }

    /// Soft delete; repeating it is a no-op success.
    pub fn delete_item(&self, id: ItemId) -> DomainResult<()> {
        let mut state = self.write();
        let item = state.items.get_mut(&id).ok_or_else(|| item_missing(id))?;
        item.mark_deleted();
        tracing::debug!(item_id = %id, "item deleted");
        Ok(())
    }

    pub fn create_cart(&self) -> Cart {
        let mut state = self.write();
        let id = state.next_cart_id;
        let cart = Cart::empty(id);

        state.next_cart_id = id.next();
        state.carts.insert(id, cart.clone());
        tracing::debug!(cart_id = %id, "cart created");
        cart
    }

    pub fn get_cart(&self, id: CartId) -> DomainResult<Cart> {
        self.read()
            .carts
            .get(&id)
            .cloned()
            .ok_or_else(|| cart_missing(id))
    }

    pub fn list_carts(&self, filter: &CartFilter, page: Page) -> Vec<Cart> {
        let state = self.read();
        let carts = page.slice(state.carts.values().filter(|c| filter.matches(c)).cloned());
        tracing::debug!(offset = page.offset(), limit = page.limit(), returned = carts.len(), "carts listed");
        carts
    }

    /// Add one unit of an item to a cart at the item's current price.
    ///
    /// Fails with `NotFound` when the cart is missing, the item is missing, or
    /// the item is deleted; each case carries its own message.
    pub fn add_item_to_cart(&self, cart_id: CartId, item_id: ItemId) -> DomainResult<()> {
        let mut state = self.write();
        let CatalogState { items, carts, .. } = &mut *state;

        let cart = carts.get_mut(&cart_id).ok_or_else(|| cart_missing(cart_id))?;
        let item = items.get(&item_id).ok_or_else(|| item_missing(item_id))?;
        if item.is_deleted() {
            return Err(DomainError::not_found(format!(
                "item {item_id} is no longer available"
            )));
        }

        let quantity = cart.add_item(item);
        tracing::debug!(
            cart_id = %cart_id,
            item_id = %item_id,
            quantity,
            cart_price = cart.price(),
            "item added to cart"
        );
        Ok(())
    }
}

impl Default for ShopCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn item_missing(id: ItemId) -> DomainError {
    DomainError::not_found(format!("item {id} does not exist"))
}

fn cart_missing(id: CartId) -> DomainError {
    DomainError::not_found(format!("cart {id} does not exist"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{PriceRange, QuantityRange};
    use shop_core::Entity;

    fn price(v: f64) -> Price {
        Price::new(v).unwrap()
    }

    fn all_items() -> ItemFilter {
        ItemFilter {
            show_deleted: true,
            ..ItemFilter::default()
        }
    }

    #[test]
    fn ids_are_assigned_from_one_per_collection() {
        let catalog = ShopCatalog::new();
        let a = catalog.create_item("a", price(1.0)).unwrap();
        let b = catalog.create_item("b", price(2.0)).unwrap();
        let cart = catalog.create_cart();

        assert_eq!(a.id(), ItemId::new(1));
        assert_eq!(b.id(), ItemId::new(2));
        assert_eq!(cart.id(), CartId::new(1));
    }

    #[test]
    fn create_item_rejects_blank_name_without_consuming_an_id() {
        let catalog = ShopCatalog::new();
        let err = catalog.create_item("", price(1.0)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let item = catalog.create_item("ok", price(1.0)).unwrap();
        assert_eq!(item.id(), ItemId::FIRST);
    }

    #[test]
    fn get_item_reports_missing() {
        let catalog = ShopCatalog::new();
        let err = catalog.get_item(ItemId::new(9)).unwrap_err();
        assert_eq!(err, DomainError::not_found("item 9 does not exist"));
    }

    #[test]
    fn delete_is_idempotent_and_hides_item() {
        let catalog = ShopCatalog::new();
        let item = catalog.create_item("apple", price(10.0)).unwrap();

        catalog.delete_item(item.id()).unwrap();
        catalog.delete_item(item.id()).unwrap();

        assert!(matches!(catalog.get_item(item.id()), Err(DomainError::NotFound(_))));
        let listed = catalog.list_items(&all_items(), Page::default());
        assert_eq!(listed.len(), 1);
        assert!(listed[0].is_deleted());
    }

    #[test]
    fn delete_missing_item_is_not_found() {
        let catalog = ShopCatalog::new();
        assert!(matches!(
            catalog.delete_item(ItemId::new(1)),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn replace_never_creates() {
        let catalog = ShopCatalog::new();
        let err = catalog.replace_item(ItemId::new(1), "x", price(1.0)).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(catalog.list_items(&all_items(), Page::default()).is_empty());
    }

    #[test]
    fn replace_works_on_deleted_item_but_update_conflicts() {
        let catalog = ShopCatalog::new();
        let item = catalog.create_item("apple", price(10.0)).unwrap();
        catalog.delete_item(item.id()).unwrap();

        let replaced = catalog.replace_item(item.id(), "pear", price(3.0)).unwrap();
        assert_eq!(replaced.name(), "pear");
        assert!(replaced.is_deleted());

        let err = catalog
            .update_item(
                item.id(),
                ItemPatch {
                    name: Some("plum".to_string()),
                    price: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let stored = catalog.list_items(&all_items(), Page::default());
        assert_eq!(stored[0].name(), "pear");
        assert_eq!(stored[0].price().value(), 3.0);
    }

    #[test]
    fn update_missing_item_is_not_found() {
        let catalog = ShopCatalog::new();
        let err = catalog.update_item(ItemId::new(4), ItemPatch::default()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn list_items_filters_and_orders_by_id() {
        let catalog = ShopCatalog::new();
        for (name, p) in [("a", 5.0), ("b", 10.0), ("c", 15.0), ("d", 20.0), ("e", 25.0)] {
            catalog.create_item(name, price(p)).unwrap();
        }
        catalog.delete_item(ItemId::new(3)).unwrap();

        let filter = ItemFilter {
            price: PriceRange::new(Some(10.0), Some(20.0)).unwrap(),
            show_deleted: false,
        };
        let names: Vec<_> = catalog
            .list_items(&filter, Page::default())
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        assert_eq!(names, vec!["b", "d"]);

        let with_deleted = ItemFilter {
            show_deleted: true,
            ..filter
        };
        assert_eq!(catalog.list_items(&with_deleted, Page::default()).len(), 3);

        let second_page = catalog.list_items(&all_items(), Page::new(2, 2).unwrap());
        let ids: Vec<_> = second_page.iter().map(|i| i.id().get()).collect();
        assert_eq!(ids, vec![3, 4]);

        assert!(catalog.list_items(&all_items(), Page::new(50, 10).unwrap()).is_empty());
    }

    #[test]
    fn get_missing_cart_is_not_found() {
        let catalog = ShopCatalog::new();
        assert_eq!(
            catalog.get_cart(CartId::new(2)).unwrap_err(),
            DomainError::not_found("cart 2 does not exist")
        );
    }

    #[test]
    fn add_to_cart_reports_each_missing_case_distinctly() {
        let catalog = ShopCatalog::new();
        let item = catalog.create_item("apple", price(10.0)).unwrap();
        let cart = catalog.create_cart();

        let no_cart = catalog.add_item_to_cart(CartId::new(99), item.id()).unwrap_err();
        let no_item = catalog.add_item_to_cart(cart.id(), ItemId::new(99)).unwrap_err();
        catalog.delete_item(item.id()).unwrap();
        let deleted = catalog.add_item_to_cart(cart.id(), item.id()).unwrap_err();

        for err in [&no_cart, &no_item, &deleted] {
            assert!(matches!(err, DomainError::NotFound(_)));
        }
        assert_ne!(no_cart.message(), no_item.message());
        assert_ne!(no_item.message(), deleted.message());
        assert_ne!(no_cart.message(), deleted.message());
    }

    #[test]
    fn apple_cart_scenario() {
        let catalog = ShopCatalog::new();
        let apple = catalog.create_item("apple", price(10.0)).unwrap();
        assert_eq!(apple.id(), ItemId::new(1));
        let cart = catalog.create_cart();
        assert_eq!(cart.id(), CartId::new(1));

        catalog.add_item_to_cart(cart.id(), apple.id()).unwrap();
        catalog.add_item_to_cart(cart.id(), apple.id()).unwrap();

        let cart_state = catalog.get_cart(cart.id()).unwrap();
        assert_eq!(cart_state.price(), 20.0);
        assert_eq!(cart_state.lines().len(), 1);
        assert_eq!(cart_state.lines()[0].quantity(), 2);

        catalog.delete_item(apple.id()).unwrap();
        assert!(matches!(catalog.get_item(apple.id()), Err(DomainError::NotFound(_))));

        let err = catalog.add_item_to_cart(cart.id(), apple.id()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(catalog.get_cart(cart.id()).unwrap(), cart_state);
    }

    #[test]
    fn cart_price_uses_price_at_add_time() {
        let catalog = ShopCatalog::new();
        let item = catalog.create_item("tea", price(4.0)).unwrap();
        let cart = catalog.create_cart();

        catalog.add_item_to_cart(cart.id(), item.id()).unwrap();
        catalog
            .update_item(
                item.id(),
                ItemPatch {
                    name: Some("green tea".to_string()),
                    price: Some(price(6.0)),
                },
            )
            .unwrap();
        catalog.add_item_to_cart(cart.id(), item.id()).unwrap();

        let cart = catalog.get_cart(cart.id()).unwrap();
        assert_eq!(cart.price(), 10.0);
        assert_eq!(cart.lines()[0].name(), "tea");
        assert_eq!(cart.lines()[0].quantity(), 2);
    }

    #[test]
    fn list_carts_filters_on_total_quantity_and_price() {
        let catalog = ShopCatalog::new();
        let cheap = catalog.create_item("cheap", price(1.0)).unwrap();
        let pricey = catalog.create_item("pricey", price(50.0)).unwrap();

        let empty = catalog.create_cart();
        let small = catalog.create_cart();
        let big = catalog.create_cart();
        catalog.add_item_to_cart(small.id(), cheap.id()).unwrap();
        for _ in 0..3 {
            catalog.add_item_to_cart(big.id(), cheap.id()).unwrap();
        }
        catalog.add_item_to_cart(big.id(), pricey.id()).unwrap();

        let by_quantity = CartFilter {
            quantity: QuantityRange::new(Some(1), Some(4)),
            ..CartFilter::default()
        };
        let ids: Vec<_> = catalog
            .list_carts(&by_quantity, Page::default())
            .iter()
            .map(|c| c.id())
            .collect();
        assert_eq!(ids, vec![small.id(), big.id()]);

        let by_price = CartFilter {
            price: PriceRange::new(None, Some(1.0)).unwrap(),
            ..CartFilter::default()
        };
        let ids: Vec<_> = catalog
            .list_carts(&by_price, Page::default())
            .iter()
            .map(|c| c.id())
            .collect();
        assert_eq!(ids, vec![empty.id(), small.id()]);

        let paged = catalog.list_carts(&CartFilter::default(), Page::new(1, 1).unwrap());
        assert_eq!(paged.len(), 1);
        assert_eq!(paged[0].id(), small.id());
    }

    #[test]
    fn concurrent_adds_are_not_lost() {
        use std::sync::Arc;

        let catalog = Arc::new(ShopCatalog::new());
        let item_id = catalog.create_item("widget", price(2.0)).unwrap().id();
        let cart_id = catalog.create_cart().id();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        catalog.add_item_to_cart(cart_id, item_id).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let cart = catalog.get_cart(cart_id).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity(), 200);
        assert_eq!(cart.price(), 400.0);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: N adds of one item give quantity N and a price equal to
            /// the sum of the item's price at each add.
            #[test]
            fn repeated_adds_accumulate(prices in proptest::collection::vec(1u32..10_000, 1..20)) {
                let catalog = ShopCatalog::new();
                let item = catalog.create_item("thing", price(f64::from(prices[0]))).unwrap();
                let cart = catalog.create_cart();

                let mut expected = 0.0;
                for p in &prices {
                    let p = f64::from(*p);
                    catalog.replace_item(item.id(), "thing", price(p)).unwrap();
                    catalog.add_item_to_cart(cart.id(), item.id()).unwrap();
                    expected += p;
                }

                let cart = catalog.get_cart(cart.id()).unwrap();
                prop_assert_eq!(cart.lines().len(), 1);
                prop_assert_eq!(cart.lines()[0].quantity() as usize, prices.len());
                prop_assert_eq!(cart.price(), expected);
            }

            /// Property: list_items is a straight slice of the filtered, id-ordered set.
            #[test]
            fn list_items_is_a_slice_of_filtered_set(
                prices in proptest::collection::vec(1u32..100, 0..30),
                min in proptest::option::of(0u32..100),
                offset in 0usize..40,
                limit in 1usize..15,
            ) {
                let catalog = ShopCatalog::new();
                for p in &prices {
                    catalog.create_item("x", price(f64::from(*p))).unwrap();
                }
                let filter = ItemFilter {
                    price: PriceRange::new(min.map(f64::from), None).unwrap(),
                    show_deleted: false,
                };

                let everything = catalog.list_items(&filter, Page::new(0, usize::MAX).unwrap());
                let page = catalog.list_items(&filter, Page::new(offset, limit).unwrap());

                let n = everything.len();
                prop_assert_eq!(page.len(), limit.min(n.saturating_sub(offset)));
                let expected: Vec<_> = everything.into_iter().skip(offset).take(limit).collect();
                prop_assert_eq!(&page, &expected);
                prop_assert!(page.windows(2).all(|w| w[0].id() < w[1].id()));
            }
        }
    }
}
