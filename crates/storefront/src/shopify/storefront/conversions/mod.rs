//! Type conversion functions for Shopify Storefront API responses.

pub mod filters;
pub mod products;

pub use filters::{distinct_product_types, distinct_vendors};
pub use products::{convert_product, convert_product_page};
