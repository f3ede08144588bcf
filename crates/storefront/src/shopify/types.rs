//! Request and response types for the catalog client.
//!
//! Product records themselves live in `lustre-core` so the cart can embed
//! them; this module adds the query options, pagination and credentials.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

pub use lustre_core::{Image, Product, Variant};

/// Default page size for product listings.
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Largest page the Storefront API serves for one connection.
pub const MAX_PAGE_SIZE: i64 = 250;

/// Number of products sampled when enumerating types and vendors.
pub const FILTER_SAMPLE_SIZE: i64 = 250;

// =============================================================================
// Credentials
// =============================================================================

/// Storefront API access for one shop.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct Credentials {
    /// Shop domain (e.g., lustre-cosmetics.myshopify.com)
    pub shop_domain: String,
    /// Storefront API access token
    pub access_token: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(shop_domain: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            shop_domain: shop_domain.into(),
            access_token: SecretString::from(access_token.into()),
        }
    }

    pub(crate) fn token(&self) -> &str {
        self.access_token.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("shop_domain", &self.shop_domain)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// Query Options
// =============================================================================

/// Sort keys supported by the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductSortKey {
    #[default]
    Title,
    Price,
}

impl std::str::FromStr for ProductSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "price" => Ok(Self::Price),
            other => Err(format!("unknown sort key: {other} (expected title or price)")),
        }
    }
}

/// Free-text filter predicates for the product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Title substring (`title:*search*`).
    pub search: String,
    /// Exact product type (`product_type:...`).
    pub product_type: String,
    /// Exact vendor (`vendor:...`).
    pub vendor: String,
}

impl ProductFilter {
    /// Compose the Shopify search syntax, or `None` if every predicate is empty.
    #[must_use]
    pub fn to_query(&self) -> Option<String> {
        let search = self.search.trim();
        let product_type = self.product_type.trim();
        let vendor = self.vendor.trim();

        let predicates: Vec<String> = [
            (!search.is_empty()).then(|| format!("title:*{search}*")),
            (!product_type.is_empty())
                .then(|| format!("product_type:{}", quote_term(product_type))),
            (!vendor.is_empty()).then(|| format!("vendor:{}", quote_term(vendor))),
        ]
        .into_iter()
        .flatten()
        .collect();

        if predicates.is_empty() {
            None
        } else {
            Some(predicates.join(" "))
        }
    }
}

/// Multi-word values are quoted so the search syntax keeps them as one term.
fn quote_term(value: &str) -> String {
    if value.contains(char::is_whitespace) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_owned()
    }
}

/// Options for [`CatalogClient::list_products`](super::CatalogClient::list_products).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQueryOptions {
    /// Page size.
    pub first: i64,
    /// Opaque cursor to continue after.
    pub after: Option<String>,
    /// Sort key.
    pub sort_key: ProductSortKey,
    /// Descending when true.
    pub reverse: bool,
    /// Filter predicates.
    pub filter: ProductFilter,
}

impl Default for ProductQueryOptions {
    fn default() -> Self {
        Self {
            first: DEFAULT_PAGE_SIZE,
            after: None,
            sort_key: ProductSortKey::Title,
            reverse: false,
            filter: ProductFilter::default(),
        }
    }
}

// =============================================================================
// Pagination Types
// =============================================================================

/// Pagination information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Cursor for the last item.
    pub end_cursor: Option<String>,
}

/// One page of products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Products in this page.
    pub products: Vec<Product>,
    /// Pagination info.
    pub page_info: PageInfo,
}
