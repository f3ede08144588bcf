//! Lustre Core - Shared types library.
//!
//! This crate provides the types shared by the Lustre components:
//! - `storefront` - Catalog client and cart store
//! - `cli` - Command-line front end for browsing and cart management
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Global ID newtypes, prices, products and cart line items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
