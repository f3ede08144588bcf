//! GraphQL query definitions for the Shopify Storefront API.
//!
//! Each query is a unit struct implementing [`GraphQLQuery`] by hand, with a
//! module holding its `Variables` and `ResponseData` in the layout the
//! `graphql_client` derive would generate.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};

use crate::shopify::types::ProductSortKey;

/// Custom scalar for Decimal (Shopify returns decimal strings).
pub type Decimal = String;

/// Custom scalar for URL (Shopify returns URL strings).
#[allow(clippy::upper_case_acronyms)]
pub type URL = String;

// =============================================================================
// Shared response shapes
// =============================================================================

/// A paginated edge/node list.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoFields {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFields {
    pub id: Option<String>,
    pub src: URL,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoneyFields {
    pub amount: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantFields {
    pub id: String,
    pub title: String,
    pub price: MoneyFields,
    pub available_for_sale: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub description: String,
    pub images: Connection<ImageFields>,
    pub variants: Connection<VariantFields>,
}

// =============================================================================
// Product queries
// =============================================================================

pub struct GetProducts;

pub mod get_products {
    use super::{Deserialize, Edge, PageInfoFields, ProductFields, ProductSortKey, Serialize};

    pub const OPERATION_NAME: &str = "GetProducts";

    pub const QUERY: &str = r"
query GetProducts($first: Int!, $after: String, $sortKey: ProductSortKeys, $reverse: Boolean, $query: String) {
  products(first: $first, after: $after, sortKey: $sortKey, reverse: $reverse, query: $query) {
    pageInfo {
      hasNextPage
      endCursor
    }
    edges {
      node {
        id
        title
        handle
        description
        images(first: 5) {
          edges {
            node {
              id
              src: url
              altText
            }
          }
        }
        variants(first: 1) {
          edges {
            node {
              id
              title
              price {
                amount
              }
              availableForSale
            }
          }
        }
      }
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub first: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub after: Option<String>,
        pub sort_key: ProductSortKey,
        pub reverse: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub query: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductsConnection {
        pub page_info: PageInfoFields,
        pub edges: Vec<Edge<ProductFields>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: ProductsConnection,
    }
}

impl GraphQLQuery for GetProducts {
    type Variables = get_products::Variables;
    type ResponseData = get_products::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: get_products::QUERY,
            operation_name: get_products::OPERATION_NAME,
        }
    }
}

pub struct GetProductByHandle;

pub mod get_product_by_handle {
    use super::{Deserialize, ProductFields, Serialize};

    pub const OPERATION_NAME: &str = "GetProductByHandle";

    pub const QUERY: &str = r"
query GetProductByHandle($handle: String!) {
  product(handle: $handle) {
    id
    title
    handle
    description
    variants(first: 250) {
      edges {
        node {
          id
          title
          availableForSale
          price {
            amount
          }
        }
      }
    }
    images(first: 250) {
      edges {
        node {
          id
          src: url
          altText
        }
      }
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<ProductFields>,
    }
}

impl GraphQLQuery for GetProductByHandle {
    type Variables = get_product_by_handle::Variables;
    type ResponseData = get_product_by_handle::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: get_product_by_handle::QUERY,
            operation_name: get_product_by_handle::OPERATION_NAME,
        }
    }
}

// =============================================================================
// Filter enumeration queries
// =============================================================================

pub struct GetProductTypes;

pub mod get_product_types {
    use super::{Connection, Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "GetProductTypes";

    pub const QUERY: &str = r"
query GetProductTypes($first: Int!) {
  products(first: $first) {
    edges {
      node {
        productType
      }
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductTypeNode {
        pub product_type: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Connection<ProductTypeNode>,
    }
}

impl GraphQLQuery for GetProductTypes {
    type Variables = get_product_types::Variables;
    type ResponseData = get_product_types::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: get_product_types::QUERY,
            operation_name: get_product_types::OPERATION_NAME,
        }
    }
}

pub struct GetVendors;

pub mod get_vendors {
    use super::{Connection, Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "GetVendors";

    pub const QUERY: &str = r"
query GetVendors($first: Int!) {
  products(first: $first) {
    edges {
      node {
        vendor
      }
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct VendorNode {
        pub vendor: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Connection<VendorNode>,
    }
}

impl GraphQLQuery for GetVendors {
    type Variables = get_vendors::Variables;
    type ResponseData = get_vendors::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: get_vendors::QUERY,
            operation_name: get_vendors::OPERATION_NAME,
        }
    }
}
