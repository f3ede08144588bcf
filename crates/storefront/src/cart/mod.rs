//! Local cart store.
//!
//! The store is the only write path for cart state. In-memory line items are
//! authoritative; the storage backend is a mirror that is read once at
//! startup ([`CartStore::load_from_storage`]) and written after every
//! mutation. A failed write is reported through [`CartStatus::error`] and is
//! never rolled back, so durability is at-least-attempted, not transactional.
//!
//! Every mutation follows the same three phases:
//!
//! 1. `set_loading(true)` - marks the store busy and clears the last error
//! 2. mutate the line items, then write them to storage
//! 3. `set_loading(false)`, or `set_error(..)` if the write failed

mod storage;

pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};

use chrono::Utc;
use lustre_core::{CartLineItem, CartStatus, Price, Product, Variant};
use tracing::{debug, warn};

use crate::shopify::Credentials;

/// Storage key holding the JSON array of line items.
pub const CART_STORAGE_KEY: &str = "cosmetic-cart";

const ADD_FAILED: &str = "Failed to add item to cart";
const REMOVE_FAILED: &str = "Failed to remove item from cart";
const UPDATE_FAILED: &str = "Failed to update quantity";
const CLEAR_FAILED: &str = "Failed to clear cart";
const SAVE_FAILED: &str = "Failed to save cart";

/// The shopping cart and its credentials.
#[derive(Debug)]
pub struct CartStore<S> {
    items: Vec<CartLineItem>,
    status: CartStatus,
    credentials: Option<Credentials>,
    is_open: bool,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Create an empty cart backed by `storage`.
    ///
    /// Nothing is read until [`load_from_storage`](Self::load_from_storage).
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            items: Vec::new(),
            status: CartStatus::new(),
            credentials: None,
            is_open: false,
            storage,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Look up a line item by ID.
    #[must_use]
    pub fn get(&self, item_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    #[must_use]
    pub const fn status(&self) -> &CartStatus {
        &self.status
    }

    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of price times quantity over all line items.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Borrow the storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutably borrow the storage backend.
    pub const fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    // =========================================================================
    // Status
    // =========================================================================

    /// Set the loading flag. Always clears the error.
    pub fn set_loading(&mut self, is_loading: bool) {
        self.status.is_loading = is_loading;
        self.status.error = None;
    }

    /// Set or clear the error. Always clears the loading flag.
    pub fn set_error(&mut self, error: Option<String>) {
        self.status.error = error;
        self.status.is_loading = false;
    }

    /// Show or hide the cart drawer.
    pub const fn set_open(&mut self, is_open: bool) {
        self.is_open = is_open;
    }

    /// Replace the API credentials. No validation is performed.
    pub fn set_credentials(&mut self, credentials: Option<Credentials>) {
        self.credentials = credentials;
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `variant`.
    ///
    /// Increments the existing line for this variant, or appends a new line
    /// holding snapshots of `product` and `variant`.
    pub fn add_to_cart(&mut self, product: &Product, variant: &Variant) {
        self.set_loading(true);

        if let Some(item) = self.items.iter_mut().find(|item| item.id == variant.id) {
            item.quantity = item.quantity.saturating_add(1);
            debug!(item_id = %item.id, quantity = item.quantity, "Incremented cart line");
        } else {
            self.items.push(CartLineItem::new(product, variant));
            debug!(item_id = %variant.id, "Added cart line");
        }

        self.persist(ADD_FAILED);
    }

    /// Remove a line item. An unknown ID is not an error.
    pub fn remove_from_cart(&mut self, item_id: &str) {
        self.set_loading(true);
        self.remove_item(item_id);
        self.persist(REMOVE_FAILED);
    }

    /// Set a line item's quantity; anything below 1 removes the line.
    ///
    /// There is no upper bound beyond saturation at `u32::MAX`. An unknown ID
    /// with a positive quantity leaves the cart unchanged.
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) {
        self.set_loading(true);

        if quantity < 1 {
            self.remove_item(item_id);
        } else if let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            debug!(item_id = %item.id, quantity = item.quantity, "Updated cart line quantity");
        }

        self.persist(UPDATE_FAILED);
    }

    /// Empty the cart and delete the storage entry.
    pub fn clear_cart(&mut self) {
        self.set_loading(true);
        self.items.clear();

        match self.storage.remove(CART_STORAGE_KEY) {
            Ok(()) => {
                debug!("Cleared cart");
                self.set_loading(false);
            }
            Err(e) => {
                warn!(error = %e, "Failed to delete stored cart");
                self.set_error(Some(CLEAR_FAILED.to_owned()));
            }
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write the line items to storage and stamp `last_updated`.
    ///
    /// On failure the error is recorded in the status and returned; the
    /// in-memory items are left as they are.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the backend write fails.
    pub fn save_to_storage(&mut self) -> Result<(), StorageError> {
        let result = serde_json::to_string(&self.items)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set(CART_STORAGE_KEY, &json));

        match result {
            Ok(()) => {
                self.status.last_updated = Utc::now();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to save cart");
                self.set_error(Some(SAVE_FAILED.to_owned()));
                Err(e)
            }
        }
    }

    /// Replace the line items with the stored cart, if any.
    ///
    /// A missing entry, an unreadable backend or malformed JSON all leave
    /// the cart as it was and set no error.
    pub fn load_from_storage(&mut self) {
        self.set_loading(true);

        match self.storage.get(CART_STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<CartLineItem>>(&json) {
                Ok(items) => {
                    debug!(count = items.len(), "Loaded stored cart");
                    self.items = dedupe(items);
                }
                Err(e) => warn!(error = %e, "Ignoring malformed stored cart"),
            },
            Ok(None) => debug!("No stored cart"),
            Err(e) => warn!(error = %e, "Failed to read stored cart"),
        }

        self.set_loading(false);
    }

    fn remove_item(&mut self, item_id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.id != item_id);
        if self.items.len() < before {
            debug!(item_id, "Removed cart line");
        }
    }

    /// Write after a mutation and finish the three-phase status update.
    fn persist(&mut self, failure: &str) {
        if self.save_to_storage().is_ok() {
            self.set_loading(false);
        } else {
            self.set_error(Some(failure.to_owned()));
        }
    }
}

/// Merge lines sharing a variant ID, keeping first-seen order.
///
/// Only reachable through an externally edited storage entry.
fn dedupe(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut out: Vec<CartLineItem> = Vec::with_capacity(items.len());
    for item in items {
        if let Some(existing) = out.iter_mut().find(|e| e.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else if item.quantity > 0 {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use lustre_core::{ProductId, VariantId};

    use super::*;

    fn variant(id: &str, price: &str) -> Variant {
        Variant {
            id: VariantId::new(id),
            title: "M / Rose".to_string(),
            price: price.to_string(),
            available: true,
        }
    }

    fn product(variants: &[Variant]) -> Product {
        Product {
            id: ProductId::new("gid://shopify/Product/1"),
            title: "Velvet Lip Tint".to_string(),
            handle: "velvet-lip-tint".to_string(),
            description: String::new(),
            images: vec![],
            variants: variants.to_vec(),
            price: Product::display_price(variants),
        }
    }

    fn store() -> CartStore<MemoryStorage> {
        CartStore::new(MemoryStorage::new())
    }

    #[test]
    fn test_add_same_variant_increments() {
        let v = variant("X", "18.00");
        let p = product(std::slice::from_ref(&v));
        let mut cart = store();

        for _ in 0..5 {
            cart.add_to_cart(&p, &v);
        }

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_add_distinct_variants_appends_in_order() {
        let a = variant("A", "10.00");
        let b = variant("B", "12.00");
        let p = product(&[a.clone(), b.clone()]);
        let mut cart = store();

        cart.add_to_cart(&p, &b);
        cart.add_to_cart(&p, &a);

        let ids: Vec<_> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_scenario_add_add_update_remove() {
        let x = variant("X", "18.00");
        let p = product(std::slice::from_ref(&x));
        let mut cart = store();

        cart.add_to_cart(&p, &x);
        assert_eq!(cart.items()[0].id, "X");
        assert_eq!(cart.items()[0].quantity, 1);

        cart.add_to_cart(&p, &x);
        assert_eq!(cart.items()[0].quantity, 2);

        cart.update_quantity("X", 1);
        assert_eq!(cart.items()[0].quantity, 1);

        cart.remove_from_cart("X");
        assert!(cart.is_empty());
        assert!(cart.status().error.is_none());
    }

    #[test]
    fn test_update_quantity_below_one_removes() {
        let x = variant("X", "18.00");
        let y = variant("Y", "18.00");
        let p = product(&[x.clone(), y.clone()]);
        let mut cart = store();
        cart.add_to_cart(&p, &x);
        cart.add_to_cart(&p, &y);

        cart.update_quantity("X", 0);
        cart.update_quantity("Y", -5);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_verbatim_and_saturating() {
        let x = variant("X", "1.00");
        let p = product(std::slice::from_ref(&x));
        let mut cart = store();
        cart.add_to_cart(&p, &x);

        cart.update_quantity("X", 999);
        assert_eq!(cart.items()[0].quantity, 999);

        cart.update_quantity("X", i64::MAX);
        assert_eq!(cart.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let x = variant("X", "1.00");
        let p = product(std::slice::from_ref(&x));
        let mut cart = store();
        cart.add_to_cart(&p, &x);

        cart.update_quantity("missing", 4);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
        assert!(cart.status().error.is_none());
    }

    #[test]
    fn test_remove_unknown_id_is_not_an_error() {
        let x = variant("X", "1.00");
        let p = product(std::slice::from_ref(&x));
        let mut cart = store();
        cart.add_to_cart(&p, &x);
        let before = cart.items().to_vec();

        cart.remove_from_cart("missing");

        assert_eq!(cart.items(), before.as_slice());
        assert!(cart.status().error.is_none());
        assert!(!cart.status().is_loading);
    }

    #[test]
    fn test_every_mutation_writes_storage() {
        let x = variant("X", "1.00");
        let p = product(std::slice::from_ref(&x));
        let mut cart = store();

        cart.add_to_cart(&p, &x);
        let stored = cart.storage().get(CART_STORAGE_KEY).unwrap().unwrap();
        let items: Vec<CartLineItem> = serde_json::from_str(&stored).unwrap();
        assert_eq!(items, cart.items());

        cart.update_quantity("X", 3);
        let stored = cart.storage().get(CART_STORAGE_KEY).unwrap().unwrap();
        let items: Vec<CartLineItem> = serde_json::from_str(&stored).unwrap();
        assert_eq!(items[0].quantity, 3);
    }

    #[test]
    fn test_save_then_fresh_load_roundtrip() {
        let a = variant("A", "10.00");
        let b = variant("B", "12.50");
        let p = product(&[a.clone(), b.clone()]);
        let mut cart = store();
        cart.add_to_cart(&p, &a);
        cart.add_to_cart(&p, &b);
        cart.update_quantity("B", 4);
        cart.save_to_storage().unwrap();

        let mut reloaded = CartStore::new(cart.storage().clone());
        reloaded.load_from_storage();

        assert_eq!(reloaded.items(), cart.items());
        assert_eq!(reloaded.subtotal(), cart.subtotal());
    }

    #[test]
    fn test_load_missing_leaves_empty() {
        let mut cart = store();
        cart.load_from_storage();
        assert!(cart.is_empty());
        assert!(cart.status().error.is_none());
        assert!(!cart.status().is_loading);
    }

    #[test]
    fn test_load_malformed_is_silent() {
        let mut storage = MemoryStorage::new();
        storage.set(CART_STORAGE_KEY, "{not json").unwrap();
        let mut cart = CartStore::new(storage);

        cart.load_from_storage();

        assert!(cart.is_empty());
        assert!(cart.status().error.is_none());
    }

    #[test]
    fn test_load_merges_duplicate_lines() {
        let x = variant("X", "2.00");
        let p = product(std::slice::from_ref(&x));
        let mut line = CartLineItem::new(&p, &x);
        line.quantity = 2;
        let json = serde_json::to_string(&vec![line.clone(), line]).unwrap();

        let mut storage = MemoryStorage::new();
        storage.set(CART_STORAGE_KEY, &json).unwrap();
        let mut cart = CartStore::new(storage);
        cart.load_from_storage();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 4);
    }

    #[test]
    fn test_clear_cart_removes_key() {
        let x = variant("X", "1.00");
        let p = product(std::slice::from_ref(&x));
        let mut cart = store();
        cart.add_to_cart(&p, &x);
        assert!(cart.storage().get(CART_STORAGE_KEY).unwrap().is_some());

        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(cart.storage().get(CART_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_failed_write_sets_error_without_rollback() {
        let x = variant("X", "1.00");
        let p = product(std::slice::from_ref(&x));
        let mut cart = CartStore::new(MemoryStorage::with_quota(16));

        cart.add_to_cart(&p, &x);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.status().error.as_deref(), Some(ADD_FAILED));
        assert!(!cart.status().is_loading);
        assert_eq!(cart.storage().get(CART_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_failed_update_reports_update_message() {
        let x = variant("X", "1.00");
        let p = product(std::slice::from_ref(&x));
        let mut cart = store();
        cart.add_to_cart(&p, &x);
        let stored = cart.storage().get(CART_STORAGE_KEY).unwrap();

        cart.storage_mut().set_quota(Some(16));
        cart.update_quantity("X", 7);

        assert_eq!(cart.items()[0].quantity, 7);
        assert_eq!(cart.status().error.as_deref(), Some(UPDATE_FAILED));
        assert!(!cart.status().is_loading);
        assert_eq!(cart.storage().get(CART_STORAGE_KEY).unwrap(), stored);
    }

    #[test]
    fn test_failed_clear_reports_clear_message() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the cart file belongs cannot be removed as a file
        std::fs::create_dir(dir.path().join(format!("{CART_STORAGE_KEY}.json"))).unwrap();
        let x = variant("X", "1.00");
        let p = product(std::slice::from_ref(&x));
        let mut cart = CartStore::new(FileStorage::new(dir.path()));
        cart.add_to_cart(&p, &x);
        assert_eq!(cart.status().error.as_deref(), Some(ADD_FAILED));

        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(cart.status().error.as_deref(), Some(CLEAR_FAILED));
        assert!(!cart.status().is_loading);
    }

    #[test]
    fn test_error_cleared_by_next_mutation() {
        let x = variant("X", "1.00");
        let p = product(std::slice::from_ref(&x));
        let mut cart = CartStore::new(MemoryStorage::with_quota(16));
        cart.add_to_cart(&p, &x);
        assert!(cart.status().error.is_some());

        cart.storage_mut().set_quota(None);
        cart.update_quantity("X", 2);

        assert!(cart.status().error.is_none());
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_save_failure_reports_save_message() {
        let x = variant("X", "1.00");
        let p = product(std::slice::from_ref(&x));
        let mut cart = CartStore::new(MemoryStorage::with_quota(16));
        cart.add_to_cart(&p, &x);

        let err = cart.save_to_storage().unwrap_err();

        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert_eq!(cart.status().error.as_deref(), Some(SAVE_FAILED));
    }

    #[test]
    fn test_successful_save_bumps_last_updated() {
        let mut cart = store();
        let before = cart.status().last_updated;
        cart.save_to_storage().unwrap();
        assert!(cart.status().last_updated >= before);
    }

    #[test]
    fn test_subtotal_uses_decimal() {
        let a = variant("A", "0.1");
        let b = variant("B", "19.99");
        let p = product(&[a.clone(), b.clone()]);
        let mut cart = store();
        cart.add_to_cart(&p, &a);
        cart.update_quantity("A", 3);
        cart.add_to_cart(&p, &b);

        assert_eq!(cart.subtotal().to_string(), "$20.29");
    }

    #[test]
    fn test_subtotal_saturates_for_huge_lines() {
        let x = variant("X", "79228162514264337593543950335");
        let y = variant("Y", "5.00");
        let p = product(&[x.clone(), y.clone()]);
        let mut cart = store();
        cart.add_to_cart(&p, &x);
        cart.add_to_cart(&p, &y);
        cart.update_quantity("X", 2);

        let max = Price::parse("79228162514264337593543950335").unwrap();
        assert_eq!(cart.items()[0].line_total(), max);
        assert_eq!(cart.subtotal(), max);
        assert!(cart.subtotal().to_string().starts_with("$79228162514264337593543950335"));
    }

    #[test]
    fn test_snapshot_not_revalidated() {
        let x = variant("X", "18.00");
        let mut p = product(std::slice::from_ref(&x));
        let mut cart = store();
        cart.add_to_cart(&p, &x);

        p.title = "Renamed".to_string();
        cart.add_to_cart(&p, &x);

        assert_eq!(cart.items()[0].product.title, "Velvet Lip Tint");
    }

    #[test]
    fn test_status_setters() {
        let mut cart = store();
        cart.set_error(Some("boom".to_string()));
        assert_eq!(cart.status().error.as_deref(), Some("boom"));
        cart.set_loading(true);
        assert!(cart.status().is_loading);
        assert!(cart.status().error.is_none());
    }

    #[test]
    fn test_credentials_and_open_flag() {
        let mut cart = store();
        assert!(cart.credentials().is_none());
        cart.set_credentials(Some(Credentials::new("lustre.myshopify.com", "t")));
        assert_eq!(
            cart.credentials().unwrap().shop_domain,
            "lustre.myshopify.com"
        );
        cart.set_open(true);
        assert!(cart.is_open());
    }
}
