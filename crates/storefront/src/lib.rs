//! Lustre Storefront library.
//!
//! Provides the two storefront components as a library so that any front end
//! (the `lustre` CLI, tests) can drive them:
//!
//! - [`shopify`] - Storefront API catalog client (products, types, vendors)
//! - [`cart`] - Local cart store with best-effort durable storage
//! - [`state`] - The explicit shop context owning one cart store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod shopify;
pub mod state;

pub use cart::{CART_STORAGE_KEY, CartStorage, CartStore, FileStorage, MemoryStorage, StorageError};
pub use config::{ConfigError, StorefrontConfig};
pub use shopify::{CatalogClient, CatalogError, Credentials};
pub use state::{Shop, VariantSelection};
