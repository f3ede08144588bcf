//! Catalog browsing commands.

use lustre_storefront::CatalogError;
use lustre_storefront::shopify::{ProductFilter, ProductQueryOptions, ProductSortKey};
use serde_json::json;
use tracing::info;

use super::{CliError, Context, output};

/// Arguments for `lustre products list`.
#[derive(Debug, Clone)]
pub struct ListArgs {
    pub first: Option<i64>,
    pub after: Option<String>,
    pub sort: ProductSortKey,
    pub reverse: bool,
    pub search: String,
    pub product_type: String,
    pub vendor: String,
}

impl ListArgs {
    fn into_options(self, default_page_size: i64) -> ProductQueryOptions {
        ProductQueryOptions {
            first: self.first.unwrap_or(default_page_size),
            after: self.after,
            sort_key: self.sort,
            reverse: self.reverse,
            filter: ProductFilter {
                search: self.search,
                product_type: self.product_type,
                vendor: self.vendor,
            },
        }
    }
}

/// List one page of products.
///
/// # Errors
///
/// Returns `CliError::NoCredentials` when no shop is configured. Catalog
/// failures degrade to an empty page.
pub async fn list(ctx: Context, args: ListArgs) -> Result<(), CliError> {
    if ctx.shop.catalog().is_none() {
        return Err(CliError::NoCredentials);
    }

    let options = args.into_options(ctx.config.page_size);
    let page = ctx.shop.browse(&options).await;

    if ctx.json {
        ctx.emit_json(&page)
    } else {
        ctx.emit(&output::render_page(&page))
    }
}

/// Show one product by handle.
///
/// # Errors
///
/// Returns the catalog error for an unknown handle or failed request.
pub async fn show(ctx: Context, handle: &str) -> Result<(), CliError> {
    let product = match ctx.shop.product(handle).await {
        Ok(Some(product)) => product,
        Ok(None) => return Err(CliError::NoCredentials),
        Err(e @ CatalogError::NotFound(_)) => {
            info!(handle, "Product not found");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    if ctx.json {
        ctx.emit_json(&product)
    } else {
        ctx.emit(&output::render_product(&product))
    }
}

/// List the product types and vendors available for filtering.
///
/// # Errors
///
/// Returns `CliError::NoCredentials` when no shop is configured.
pub async fn filters(ctx: Context) -> Result<(), CliError> {
    if ctx.shop.catalog().is_none() {
        return Err(CliError::NoCredentials);
    }

    let (types, vendors) = ctx.shop.filters().await;

    if ctx.json {
        ctx.emit_json(&json!({ "productTypes": types, "vendors": vendors }))
    } else {
        ctx.emit(&output::render_filters(&types, &vendors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ListArgs {
        ListArgs {
            first: None,
            after: None,
            sort: ProductSortKey::Price,
            reverse: true,
            search: "serum".to_string(),
            product_type: String::new(),
            vendor: "Lustre".to_string(),
        }
    }

    #[test]
    fn test_list_args_default_page_size() {
        let options = args().into_options(24);
        assert_eq!(options.first, 24);
        assert_eq!(options.sort_key, ProductSortKey::Price);
        assert!(options.reverse);
        assert_eq!(
            options.filter.to_query().as_deref(),
            Some("title:*serum* vendor:Lustre")
        );
    }

    #[test]
    fn test_list_args_explicit_first() {
        let options = ListArgs {
            first: Some(4),
            after: Some("cursor".to_string()),
            ..args()
        }
        .into_options(12);
        assert_eq!(options.first, 4);
        assert_eq!(options.after.as_deref(), Some("cursor"));
    }
}
