//! Cart Store
//!
//! Owns the cart lines and the wishlist, keeps their invariants and writes
//! every change straight through to a [`BlobStore`].
//!
//! - At most one cart line per product, in insertion order, each with a
//!   quantity of at least 1.
//! - At most one wishlist entry per product, in insertion order.
//!
//! Storage problems never reach the caller: unreadable slots hydrate as empty
//! collections and failed writes are logged, leaving the in-memory state
//! authoritative for the rest of the session.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{
    cart::CartLine,
    catalog::Catalog,
    pricing::CartSnapshot,
    products::{Product, ProductId},
    storage::{BlobStore, CART_SLOT, WISHLIST_SLOT, decode_slot, write_slot},
    wishlist::{WishlistEntry, WishlistToggle},
};

/// Cart store errors surfaced to callers for user-facing messaging.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartStoreError {
    /// The referenced product is not in the catalog.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// Checkout was requested with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,
}

/// Cart and wishlist state persisted to a blob store.
#[derive(Debug)]
pub struct CartStore<S> {
    lines: Vec<CartLine>,
    wishlist: Vec<WishlistEntry>,
    blobs: S,
}

impl<S: BlobStore> CartStore<S> {
    /// Hydrate a store from its blob store.
    ///
    /// Missing or corrupt slots start out as empty collections.
    pub fn open(blobs: S) -> Self {
        let lines = normalize_lines(read_collection(&blobs, CART_SLOT));
        let wishlist = normalize_wishlist(read_collection(&blobs, WISHLIST_SLOT));

        info!(
            lines = lines.len(),
            wishlist = wishlist.len(),
            "cart store hydrated"
        );

        Self {
            lines,
            wishlist,
            blobs,
        }
    }

    /// Add one unit of a product to the cart.
    ///
    /// Increments the existing line or appends a new one snapshotting the
    /// product, then returns the resulting line.
    pub fn add_to_cart(&mut self, product: &Product) -> CartLine {
        self.add_line(CartLine::from_product(product))
    }

    /// Resolve a product through the catalog and add it to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::NotFound`] if the catalog has no such product.
    pub fn add_to_cart_by_id(
        &mut self,
        catalog: &Catalog,
        id: &ProductId,
    ) -> Result<CartLine, CartStoreError> {
        let product = catalog
            .get(id)
            .ok_or_else(|| CartStoreError::NotFound(id.clone()))?;

        Ok(self.add_to_cart(product))
    }

    /// Remove a product's line from the cart, returning whether one existed.
    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.product_id != id);
        let removed = self.lines.len() != before;

        debug!(product = %id, removed, "remove from cart");

        self.persist_cart();

        removed
    }

    /// Overwrite the quantity of a product's line.
    ///
    /// A quantity of 0 removes the line. Returns the updated line, or `None` if
    /// the product is not (or no longer) in the cart.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> Option<CartLine> {
        if quantity < 1 {
            self.remove_from_cart(id);
            return None;
        }

        let updated = self
            .lines
            .iter_mut()
            .find(|line| &line.product_id == id)
            .map(|line| {
                line.quantity = quantity;
                line.clone()
            });

        debug!(product = %id, quantity, found = updated.is_some(), "set quantity");

        self.persist_cart();

        updated
    }

    /// Empty the cart, returning how many lines were removed.
    pub fn clear_cart(&mut self) -> usize {
        let cleared = self.lines.len();
        self.lines.clear();

        debug!(cleared, "clear cart");

        self.persist_cart();

        cleared
    }

    /// Add a product to the wishlist, or remove it if it is already there.
    pub fn toggle_wishlist(&mut self, product: &Product) -> WishlistToggle {
        let outcome = if let Some(idx) = self.wishlist_position(&product.id) {
            self.wishlist.remove(idx);
            WishlistToggle::Removed
        } else {
            self.wishlist.push(WishlistEntry::from(product));
            WishlistToggle::Added
        };

        debug!(product = %product.id, ?outcome, "toggle wishlist");

        self.persist_wishlist();

        outcome
    }

    /// Resolve a product through the catalog and toggle it on the wishlist.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::NotFound`] if the catalog has no such product.
    pub fn toggle_wishlist_by_id(
        &mut self,
        catalog: &Catalog,
        id: &ProductId,
    ) -> Result<WishlistToggle, CartStoreError> {
        let product = catalog
            .get(id)
            .ok_or_else(|| CartStoreError::NotFound(id.clone()))?;

        Ok(self.toggle_wishlist(product))
    }

    /// Add a wishlisted item to the cart exactly as it was saved.
    ///
    /// Uses the entry's snapshot rather than the current catalog. The entry
    /// stays on the wishlist. Returns `None` if the product is not wishlisted.
    pub fn merge_wishlist_into_cart(&mut self, id: &ProductId) -> Option<CartLine> {
        let Some(entry) = self.wishlist.iter().find(|entry| &entry.id == id) else {
            debug!(product = %id, "merge skipped, not wishlisted");
            return None;
        };

        let line = CartLine::from_wishlist_entry(entry);

        Some(self.add_line(line))
    }

    /// Totals over the current cart.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from_lines(&self.lines)
    }

    /// Totals for checkout.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::EmptyCart`] if the cart has no lines.
    pub fn checkout(&self) -> Result<CartSnapshot, CartStoreError> {
        if self.lines.is_empty() {
            return Err(CartStoreError::EmptyCart);
        }

        Ok(self.snapshot())
    }

    /// Whether a product is on the wishlist.
    pub fn is_wishlisted(&self, id: &ProductId) -> bool {
        self.wishlist_position(id).is_some()
    }

    /// Cart lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// A product's cart line, if present.
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product_id == id)
    }

    /// Wishlist entries in display order.
    pub fn wishlist(&self) -> &[WishlistEntry] {
        &self.wishlist
    }

    /// Sum of all line quantities.
    pub fn item_count(&self) -> u64 {
        self.snapshot().item_count
    }

    /// Number of wishlist entries.
    pub fn wishlist_count(&self) -> usize {
        self.wishlist.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Borrow the underlying blob store.
    pub fn blobs(&self) -> &S {
        &self.blobs
    }

    /// Give back the underlying blob store.
    pub fn into_blobs(self) -> S {
        self.blobs
    }

    fn add_line(&mut self, new_line: CartLine) -> CartLine {
        let line = if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == new_line.product_id)
        {
            line.quantity = line.quantity.saturating_add(1);
            line.clone()
        } else {
            self.lines.push(new_line.clone());
            new_line
        };

        debug!(product = %line.product_id, quantity = line.quantity, "add to cart");

        self.persist_cart();

        line
    }

    fn wishlist_position(&self, id: &ProductId) -> Option<usize> {
        self.wishlist.iter().position(|entry| &entry.id == id)
    }

    fn persist_cart(&mut self) {
        if let Err(error) = write_slot(&mut self.blobs, CART_SLOT, &self.lines) {
            error!(slot = CART_SLOT, %error, "failed to persist cart");
        }
    }

    fn persist_wishlist(&mut self) {
        if let Err(error) = write_slot(&mut self.blobs, WISHLIST_SLOT, &self.wishlist) {
            error!(slot = WISHLIST_SLOT, %error, "failed to persist wishlist");
        }
    }
}

fn read_collection<S, T>(blobs: &S, slot: &str) -> Vec<T>
where
    S: BlobStore,
    T: serde::de::DeserializeOwned,
{
    let raw = match blobs.get(slot) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(error) => {
            warn!(slot, %error, "slot unreadable, starting empty");
            return Vec::new();
        }
    };

    decode_slot(slot, &raw).unwrap_or_else(|error| {
        warn!(slot, %error, "slot corrupt, starting empty");
        Vec::new()
    })
}

/// Drop zero-quantity lines and fold duplicate products into their first line.
fn normalize_lines(lines: Vec<CartLine>) -> Vec<CartLine> {
    let loaded = lines.len();
    let mut positions: FxHashMap<ProductId, usize> = FxHashMap::default();
    let mut normalized: Vec<CartLine> = Vec::with_capacity(loaded);

    for line in lines {
        if line.quantity == 0 {
            continue;
        }

        if let Some(existing) = positions
            .get(&line.product_id)
            .and_then(|&idx| normalized.get_mut(idx))
        {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
            continue;
        }

        positions.insert(line.product_id.clone(), normalized.len());
        normalized.push(line);
    }

    if normalized.len() != loaded {
        warn!(loaded, kept = normalized.len(), "repaired persisted cart");
    }

    normalized
}

/// Keep the first entry for each product.
fn normalize_wishlist(entries: Vec<WishlistEntry>) -> Vec<WishlistEntry> {
    let loaded = entries.len();
    let mut normalized: Vec<WishlistEntry> = Vec::with_capacity(loaded);

    for entry in entries {
        if !normalized.iter().any(|kept| kept.id == entry.id) {
            normalized.push(entry);
        }
    }

    if normalized.len() != loaded {
        warn!(loaded, kept = normalized.len(), "repaired persisted wishlist");
    }

    normalized
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::{MemoryBlobStore, StorageError};

    use super::*;

    fn phone() -> Product {
        Product::new("1", "iPhone 12 Pro", 45_000, "phone.jpg", "delhi")
    }

    fn table() -> Product {
        Product::new("2", "Wooden Study Table", 3_500, "table.jpg", "mumbai")
    }

    fn empty_store() -> CartStore<MemoryBlobStore> {
        CartStore::open(MemoryBlobStore::new())
    }

    /// Blob store whose writes always fail.
    #[derive(Debug, Default)]
    struct ReadOnlyBlobStore;

    impl BlobStore for ReadOnlyBlobStore {
        fn get(&self, _name: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, _name: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn add_new_product_appends_line() {
        let mut store = empty_store();

        let line = store.add_to_cart(&phone());

        assert_eq!(line.quantity, 1);
        assert_eq!(store.lines(), [line]);
    }

    #[test]
    fn add_same_product_increments_quantity() {
        let mut store = empty_store();

        store.add_to_cart(&phone());
        store.add_to_cart(&table());
        let line = store.add_to_cart(&phone());

        assert_eq!(line.quantity, 2);
        assert_eq!(store.lines().len(), 2);
        assert_eq!(store.item_count(), 3);
    }

    #[test]
    fn add_keeps_add_time_snapshot() {
        let mut store = empty_store();
        store.add_to_cart(&phone());

        let repriced = Product {
            price: 40_000,
            ..phone()
        };
        let line = store.add_to_cart(&repriced);

        assert_eq!(line.price, 45_000);
    }

    #[test]
    fn add_by_unknown_id_is_not_found() {
        let mut store = empty_store();

        let result = store.add_to_cart_by_id(&Catalog::sample(), &ProductId::from("99"));

        assert_eq!(result, Err(CartStoreError::NotFound(ProductId::from("99"))));
        assert!(store.is_empty(), "cart should be empty");
    }

    #[test]
    fn add_by_id_resolves_through_catalog() -> TestResult {
        let mut store = empty_store();

        let line = store.add_to_cart_by_id(&Catalog::sample(), &ProductId::from("2"))?;

        assert_eq!(line.name, "Wooden Study Table");

        Ok(())
    }

    #[test]
    fn remove_absent_product_is_noop() {
        let mut store = empty_store();
        store.add_to_cart(&phone());

        assert!(!store.remove_from_cart(&ProductId::from("2")));
        assert_eq!(store.lines().len(), 1);
    }

    #[test]
    fn set_quantity_overwrites() {
        let mut store = empty_store();
        store.add_to_cart(&phone());

        let line = store.set_quantity(&phone().id, 4);

        assert_eq!(line.map(|l| l.quantity), Some(4));
        assert_eq!(store.snapshot().item_count, 4);
    }

    #[test]
    fn set_quantity_zero_matches_remove() {
        let mut via_set = empty_store();
        let mut via_remove = empty_store();

        for store in [&mut via_set, &mut via_remove] {
            store.add_to_cart(&phone());
            store.add_to_cart(&table());
        }

        via_set.set_quantity(&phone().id, 0);
        via_remove.remove_from_cart(&phone().id);

        assert_eq!(via_set.lines(), via_remove.lines());
        assert_eq!(
            via_set.blobs().get(CART_SLOT).ok().flatten(),
            via_remove.blobs().get(CART_SLOT).ok().flatten()
        );
    }

    #[test]
    fn set_quantity_absent_is_noop() {
        let mut store = empty_store();

        assert_eq!(store.set_quantity(&phone().id, 3), None);
        assert!(store.is_empty(), "cart should be empty");
    }

    #[test]
    fn clear_cart_reports_removed_lines() {
        let mut store = empty_store();
        store.add_to_cart(&phone());
        store.add_to_cart(&table());

        assert_eq!(store.clear_cart(), 2);
        assert_eq!(store.clear_cart(), 0);
        assert!(store.is_empty(), "cart should be empty");
    }

    #[test]
    fn toggle_wishlist_adds_then_removes() {
        let mut store = empty_store();

        assert_eq!(store.toggle_wishlist(&phone()), WishlistToggle::Added);
        assert!(store.is_wishlisted(&phone().id), "phone should be wishlisted");

        assert_eq!(store.toggle_wishlist(&phone()), WishlistToggle::Removed);
        assert!(!store.is_wishlisted(&phone().id), "phone should not be wishlisted");
        assert_eq!(store.wishlist_count(), 0);
    }

    #[test]
    fn toggle_wishlist_twice_preserves_other_entries() {
        let mut store = empty_store();
        store.toggle_wishlist(&table());
        let before = store.wishlist().to_vec();

        store.toggle_wishlist(&phone());
        store.toggle_wishlist(&phone());

        assert_eq!(store.wishlist(), before.as_slice());
    }

    #[test]
    fn toggle_by_unknown_id_is_not_found() {
        let mut store = empty_store();

        let result = store.toggle_wishlist_by_id(&Catalog::sample(), &ProductId::from("x"));

        assert_eq!(result, Err(CartStoreError::NotFound(ProductId::from("x"))));
    }

    #[test]
    fn merge_uses_wishlist_snapshot() {
        let mut store = empty_store();
        store.toggle_wishlist(&phone());

        let line = store.merge_wishlist_into_cart(&phone().id);

        assert_eq!(line.as_ref().map(|l| l.price), Some(45_000));
        assert_eq!(line.map(|l| l.quantity), Some(1));
        assert!(store.is_wishlisted(&phone().id), "phone should be wishlisted");
    }

    #[test]
    fn merge_increments_existing_line() {
        let mut store = empty_store();
        store.add_to_cart(&phone());
        store.toggle_wishlist(&phone());

        let line = store.merge_wishlist_into_cart(&phone().id);

        assert_eq!(line.map(|l| l.quantity), Some(2));
    }

    #[test]
    fn merge_absent_entry_is_noop() {
        let mut store = empty_store();

        assert_eq!(store.merge_wishlist_into_cart(&phone().id), None);
        assert!(store.is_empty(), "cart should be empty");
    }

    #[test]
    fn checkout_empty_cart_errors() {
        let store = empty_store();

        assert_eq!(store.checkout(), Err(CartStoreError::EmptyCart));
    }

    #[test]
    fn checkout_returns_snapshot() -> TestResult {
        let mut store = empty_store();
        store.add_to_cart(&phone());

        let totals = store.checkout()?;

        assert_eq!(totals.total, 47_250);

        Ok(())
    }

    #[test]
    fn every_mutation_writes_through() -> TestResult {
        let mut store = empty_store();

        store.add_to_cart(&phone());
        let raw = store.blobs().get(CART_SLOT)?.unwrap_or_default();
        assert!(raw.contains("\"productId\":\"1\""), "cart slot was {raw}");

        store.toggle_wishlist(&table());
        let raw = store.blobs().get(WISHLIST_SLOT)?.unwrap_or_default();
        assert!(raw.contains("\"id\":\"2\""), "wishlist slot was {raw}");

        store.clear_cart();
        assert_eq!(store.blobs().get(CART_SLOT)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn failed_writes_keep_in_memory_state() {
        let mut store = CartStore::open(ReadOnlyBlobStore);

        store.add_to_cart(&phone());
        store.toggle_wishlist(&phone());

        assert_eq!(store.item_count(), 1);
        assert!(store.is_wishlisted(&phone().id), "phone should be wishlisted");
    }

    #[test]
    fn hydrate_repairs_zero_quantities_and_duplicates() {
        let blobs = MemoryBlobStore::with_slots([
            (
                CART_SLOT,
                r#"[
                    {"productId":"1","name":"a","price":10,"image":"","location":"","quantity":2},
                    {"productId":"2","name":"b","price":20,"image":"","location":"","quantity":0},
                    {"productId":"1","name":"a","price":10,"image":"","location":"","quantity":3}
                ]"#,
            ),
            (
                WISHLIST_SLOT,
                r#"[
                    {"id":"1","name":"a","price":10,"image":"","location":""},
                    {"id":"1","name":"a","price":10,"image":"","location":""}
                ]"#,
            ),
        ]);

        let store = CartStore::open(blobs);

        assert_eq!(store.lines().len(), 1);
        assert_eq!(store.line(&ProductId::from("1")).map(|l| l.quantity), Some(5));
        assert_eq!(store.wishlist_count(), 1);
    }

    #[test]
    fn hydrate_corrupt_cart_keeps_valid_wishlist() {
        let blobs = MemoryBlobStore::with_slots([
            (CART_SLOT, "definitely not json"),
            (
                WISHLIST_SLOT,
                r#"[{"id":"3","name":"Bag","price":8000,"image":"","location":"bangalore"}]"#,
            ),
        ]);

        let store = CartStore::open(blobs);

        assert!(store.is_empty(), "cart should be empty");
        assert!(store.is_wishlisted(&ProductId::from("3")));
    }
}
