//! Core types for Lustre.
//!
//! This module provides the catalog view models and the cart line item
//! snapshot that gets persisted to durable storage.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{CartLineItem, CartStatus};
pub use id::*;
pub use price::{Price, format_price};
pub use product::{Image, Product, Variant, VariantOptions};
