//! Integration tests for Lustre.
//!
//! Catalog tests run the real `CatalogClient` against a `wiremock` server
//! standing in for the Storefront API, so no network traffic is made. Cart
//! tests use a `FileStorage` rooted in a temporary directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lustre-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Product listing, lookup and filter enumeration over HTTP
//! - `cart` - Cart persistence across shop sessions

use lustre_storefront::{CatalogClient, Credentials};
use serde_json::{Value, json};
use url::Url;

/// Access token sent by every test client.
pub const TEST_TOKEN: &str = "3b1f7c0d9e2a4b6c8d0e1f2a3b4c5d6e";

/// Credentials for a test shop.
#[must_use]
pub fn test_credentials() -> Credentials {
    Credentials::new("lustre-test.myshopify.com", TEST_TOKEN)
}

/// The GraphQL endpoint on a mock server.
///
/// # Panics
///
/// Panics if the mock server URI is not a valid URL.
#[must_use]
pub fn graphql_endpoint(server_uri: &str) -> Url {
    Url::parse(&format!("{server_uri}/api/2024-01/graphql.json"))
        .expect("mock server URI is a valid URL")
}

/// A catalog client pointed at a mock server.
#[must_use]
pub fn test_client(server_uri: &str) -> CatalogClient {
    CatalogClient::with_endpoint(graphql_endpoint(server_uri), &test_credentials())
}

/// A product node as the Storefront API returns it.
#[must_use]
pub fn product_node(n: u32, price: &str) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{n}"),
        "title": format!("Product {n}"),
        "handle": format!("product-{n}"),
        "description": format!("Description {n}"),
        "images": {
            "edges": [{
                "node": {
                    "id": format!("gid://shopify/ProductImage/{n}"),
                    "src": format!("https://cdn.shopify.com/p{n}.jpg"),
                    "altText": null
                }
            }]
        },
        "variants": {
            "edges": [{
                "node": {
                    "id": format!("gid://shopify/ProductVariant/{n}"),
                    "title": "S / Rose",
                    "price": { "amount": price },
                    "availableForSale": true
                }
            }]
        }
    })
}

/// A `GetProducts` response body.
#[must_use]
pub fn products_response(nodes: Vec<Value>, has_next_page: bool, end_cursor: Option<&str>) -> Value {
    let edges: Vec<Value> = nodes.into_iter().map(|node| json!({ "node": node })).collect();
    json!({
        "data": {
            "products": {
                "pageInfo": { "hasNextPage": has_next_page, "endCursor": end_cursor },
                "edges": edges
            }
        }
    })
}

/// A response whose product nodes carry a single `field` (`productType` or `vendor`).
#[must_use]
pub fn field_response(field: &str, values: &[&str]) -> Value {
    let edges: Vec<Value> = values
        .iter()
        .map(|value| json!({ "node": { field: value } }))
        .collect();
    json!({ "data": { "products": { "edges": edges } } })
}
