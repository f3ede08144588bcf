//! Cart line items and the cart status envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::VariantId;
use super::price::Price;
use super::product::{Product, Variant};

/// One entry in the cart, keyed by variant ID.
///
/// `product` and `variant` are copies taken when the item was added and are
/// never re-synchronized with the live catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Line item ID, always equal to `variant.id`.
    pub id: VariantId,
    /// Quantity, at least 1.
    pub quantity: u32,
    /// Variant snapshot.
    pub variant: Variant,
    /// Product snapshot.
    pub product: Product,
}

impl CartLineItem {
    /// Create a new line item with quantity 1.
    #[must_use]
    pub fn new(product: &Product, variant: &Variant) -> Self {
        Self {
            id: variant.id.clone(),
            quantity: 1,
            variant: variant.clone(),
            product: product.clone(),
        }
    }

    /// Variant price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.variant.price_value().times(self.quantity)
    }
}

/// Loading/error envelope around cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartStatus {
    /// A mutation is in progress.
    pub is_loading: bool,
    /// Message from the last failed mutation, cleared when the next begins.
    pub error: Option<String>,
    /// Time of the last successful storage write.
    pub last_updated: DateTime<Utc>,
}

impl CartStatus {
    /// Idle status stamped with the current time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            is_loading: false,
            error: None,
            last_updated: Utc::now(),
        }
    }
}

impl Default for CartStatus {
    fn default() -> Self {
        Self::new()
    }
}
