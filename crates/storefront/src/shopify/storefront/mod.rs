//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` envelopes with `reqwest` 0.13 for HTTP. Every call
//! goes to the network: no caching, no retries, no timeouts, no cancellation.

mod conversions;
pub mod queries;

use std::collections::BTreeSet;
use std::sync::Arc;

use graphql_client::{GraphQLQuery, Response};
use tracing::{debug, instrument};
use url::Url;

use crate::shopify::CatalogError;
use crate::shopify::types::{
    Credentials, FILTER_SAMPLE_SIZE, Product, ProductPage, ProductQueryOptions,
};

use conversions::{convert_product, convert_product_page, distinct_product_types, distinct_vendors};
use queries::{
    GetProductByHandle, GetProductTypes, GetProducts, GetVendors, get_product_by_handle,
    get_product_types, get_products, get_vendors,
};

/// Header carrying the Storefront API access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Characters of a response body kept in logs and error messages.
const BODY_EXCERPT_LEN: usize = 500;

fn excerpt(body: &str, len: usize) -> String {
    body.chars().take(len).collect()
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the Shopify Storefront API catalog.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
    access_token: String,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl CatalogClient {
    /// Create a client for `https://{shop_domain}/api/{api_version}/graphql.json`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidEndpoint` if the shop domain does not
    /// form a valid URL.
    pub fn new(credentials: &Credentials, api_version: &str) -> Result<Self, CatalogError> {
        let endpoint = Url::parse(&format!(
            "https://{}/api/{}/graphql.json",
            credentials.shop_domain, api_version
        ))?;
        Ok(Self::with_endpoint(endpoint, credentials))
    }

    /// Create a client against an explicit GraphQL endpoint (proxies, tests).
    #[must_use]
    pub fn with_endpoint(endpoint: Url, credentials: &Credentials) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token: credentials.token().to_string(),
            }),
        }
    }

    /// The GraphQL endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Execute a GraphQL query.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, CatalogError>
    where
        Q::Variables: serde::Serialize,
    {
        let request_body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.inner.access_token)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&response_text, BODY_EXCERPT_LEN),
                "Storefront API returned non-success status"
            );
            return Err(CatalogError::message(format!(
                "HTTP {status}: {}",
                excerpt(&response_text, 200)
            )));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %excerpt(&response_text, BODY_EXCERPT_LEN),
                    "Failed to parse Storefront GraphQL response"
                );
                return Err(CatalogError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");
            return Err(CatalogError::GraphQL(
                errors.into_iter().map(Into::into).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %excerpt(&response_text, BODY_EXCERPT_LEN),
                "Storefront GraphQL response has no data and no errors"
            );
            CatalogError::message("No data in response")
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get one page of products.
    ///
    /// Pages are not a consistent snapshot: if the catalog changes between
    /// calls, continuing from `end_cursor` may skip or repeat products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    pub async fn list_products(
        &self,
        options: &ProductQueryOptions,
    ) -> Result<ProductPage, CatalogError> {
        let variables = get_products::Variables {
            first: options.first,
            after: options.after.clone(),
            sort_key: options.sort_key,
            reverse: options.reverse,
            query: options.filter.to_query(),
        };

        let data = self.execute::<GetProducts>(variables).await?;
        let page = convert_product_page(data.products);

        debug!(
            count = page.products.len(),
            has_next_page = page.page_info.has_next_page,
            "Fetched product page"
        );
        Ok(page)
    }

    /// Get a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this handle, or an
    /// error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(&self, handle: &str) -> Result<Product, CatalogError> {
        let variables = get_product_by_handle::Variables {
            handle: handle.to_string(),
        };

        let data = self.execute::<GetProductByHandle>(variables).await?;

        data.product
            .map(convert_product)
            .ok_or_else(|| CatalogError::NotFound(format!("Product not found: {handle}")))
    }

    // =========================================================================
    // Filter Methods
    // =========================================================================

    /// Distinct non-empty product types.
    ///
    /// Only the first 250 catalog records are sampled, so a type that appears
    /// exclusively beyond that point is not reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_product_types(&self) -> Result<BTreeSet<String>, CatalogError> {
        let data = self
            .execute::<GetProductTypes>(get_product_types::Variables {
                first: FILTER_SAMPLE_SIZE,
            })
            .await?;
        Ok(distinct_product_types(data))
    }

    /// Distinct non-empty vendors.
    ///
    /// Only the first 250 catalog records are sampled, so a vendor that
    /// appears exclusively beyond that point is not reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_vendors(&self) -> Result<BTreeSet<String>, CatalogError> {
        let data = self
            .execute::<GetVendors>(get_vendors::Variables {
                first: FILTER_SAMPLE_SIZE,
            })
            .await?;
        Ok(distinct_vendors(data))
    }
}
