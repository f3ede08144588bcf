//! The shop context: one explicitly constructed cart store plus the means to
//! reach the catalog with its current credentials.
//!
//! Front ends create a single `Shop` at startup and pass it by reference.
//! Catalog-backed operations are silent no-ops while no credentials are set,
//! and catalog failures are logged and degraded here so front ends only ever
//! see an empty or unchanged result.

use std::collections::BTreeSet;

use tracing::{debug, warn};
use url::Url;

use crate::cart::{CartStorage, CartStore};
use crate::config::StorefrontConfig;
use crate::shopify::types::{Product, ProductPage, ProductQueryOptions};
use crate::shopify::{CatalogClient, CatalogError, Credentials};

/// Application state for one storefront session.
#[derive(Debug)]
pub struct Shop<S> {
    cart: CartStore<S>,
    api_version: String,
    endpoint_override: Option<Url>,
}

impl<S: CartStorage> Shop<S> {
    /// Create the shop, apply configured credentials and load the stored cart.
    #[must_use]
    pub fn open(config: &StorefrontConfig, storage: S) -> Self {
        let mut cart = CartStore::new(storage);
        cart.set_credentials(config.credentials.clone());
        cart.load_from_storage();

        Self {
            cart,
            api_version: config.api_version.clone(),
            endpoint_override: None,
        }
    }

    /// Send catalog requests to `endpoint` instead of the shop domain.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint_override = Some(endpoint);
        self
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// The cart's mutation methods are the only write path for cart state.
    pub const fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    /// Replace the credentials used for catalog calls.
    pub fn set_credentials(&mut self, credentials: Option<Credentials>) {
        self.cart.set_credentials(credentials);
    }

    /// A catalog client for the current credentials, or `None` without them.
    #[must_use]
    pub fn catalog(&self) -> Option<CatalogClient> {
        let credentials = self.cart.credentials()?;

        if let Some(endpoint) = &self.endpoint_override {
            return Some(CatalogClient::with_endpoint(endpoint.clone(), credentials));
        }

        match CatalogClient::new(credentials, &self.api_version) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, shop_domain = %credentials.shop_domain, "Unusable shop domain");
                None
            }
        }
    }

    /// One page of products; an empty page without credentials or on failure.
    pub async fn browse(&self, options: &ProductQueryOptions) -> ProductPage {
        let Some(catalog) = self.catalog() else {
            debug!("No credentials, skipping product listing");
            return ProductPage::default();
        };

        match catalog.list_products(options).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching products");
                ProductPage::default()
            }
        }
    }

    /// A product by handle; `Ok(None)` without credentials.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown handle so the caller
    /// can show a message and navigate away, or the transport error.
    pub async fn product(&self, handle: &str) -> Result<Option<Product>, CatalogError> {
        let Some(catalog) = self.catalog() else {
            debug!("No credentials, skipping product lookup");
            return Ok(None);
        };

        catalog.get_product_by_handle(handle).await.map(Some)
    }

    /// Product types and vendors for the filter pickers, fetched concurrently.
    ///
    /// Both lists are sampled from the first 250 products only. Either list
    /// is empty without credentials or when its request fails.
    pub async fn filters(&self) -> (BTreeSet<String>, BTreeSet<String>) {
        let Some(catalog) = self.catalog() else {
            debug!("No credentials, skipping filter enumeration");
            return (BTreeSet::new(), BTreeSet::new());
        };

        let (types, vendors) = tokio::join!(catalog.list_product_types(), catalog.list_vendors());

        let types = types.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Error fetching product types");
            BTreeSet::new()
        });
        let vendors = vendors.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Error fetching vendors");
            BTreeSet::new()
        });

        (types, vendors)
    }

    /// Fetch a product and add `quantity` units of a variant to the cart.
    ///
    /// Each unit is a separate [`CartStore::add_to_cart`] call with its own
    /// storage write; a quantity of 0 adds one unit. The variant is chosen by
    /// ID, else by size/color, else the product's first variant. Returns the
    /// added variant, or `Ok(None)` without credentials.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the product or requested variant
    /// does not exist, or the transport error.
    pub async fn add_product(
        &mut self,
        handle: &str,
        selection: &VariantSelection,
        quantity: u32,
    ) -> Result<Option<lustre_core::Variant>, CatalogError> {
        let Some(product) = self.product(handle).await? else {
            return Ok(None);
        };

        let variant = selection
            .pick(&product)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("No matching variant for {handle}")))?;

        for _ in 0..quantity.max(1) {
            self.cart.add_to_cart(&product, &variant);
        }
        Ok(Some(variant))
    }
}

/// How to choose a variant on a product page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSelection {
    /// Exact variant ID.
    pub variant_id: Option<String>,
    /// Size option value.
    pub size: Option<String>,
    /// Color option value.
    pub color: Option<String>,
}

impl VariantSelection {
    /// Resolve against a product; no criteria selects the first variant.
    #[must_use]
    pub fn pick<'a>(&self, product: &'a Product) -> Option<&'a lustre_core::Variant> {
        if let Some(id) = &self.variant_id {
            return product.variant(id);
        }
        if let Some(size) = &self.size {
            return product.find_variant(size, self.color.as_deref());
        }
        product.variants.first()
    }
}
