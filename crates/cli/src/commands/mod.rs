//! CLI command implementations.

pub mod cart;
mod output;
pub mod products;

use std::io::{self, Write};

use lustre_storefront::{CatalogError, ConfigError, FileStorage, Shop, StorefrontConfig};
use thiserror::Error;

/// Errors that end a command with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A catalog lookup failed.
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// The cart store recorded an error for the last mutation.
    #[error("Cart error: {0}")]
    Cart(String),

    /// No shop is configured for a command that needs the catalog.
    #[error("No shop configured: set SHOPIFY_STORE and SHOPIFY_STOREFRONT_TOKEN")]
    NoCredentials,

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Io(#[from] io::Error),

    /// JSON output could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a command needs: the shop and how to print.
pub struct Context {
    pub shop: Shop<FileStorage>,
    pub config: StorefrontConfig,
    pub json: bool,
}

impl Context {
    pub fn from_env(json: bool) -> Result<Self, CliError> {
        let config = StorefrontConfig::from_env()?;
        let storage = FileStorage::new(&config.cart_dir);
        let shop = Shop::open(&config, storage);
        Ok(Self { shop, config, json })
    }

    /// Write a rendered block to stdout.
    pub fn emit(&self, text: &str) -> Result<(), CliError> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Write a value as pretty JSON to stdout.
    pub fn emit_json<T: serde::Serialize>(&self, value: &T) -> Result<(), CliError> {
        self.emit(&serde_json::to_string_pretty(value)?)
    }

    /// Fail the command if the last cart mutation recorded an error.
    pub fn check_cart(&self) -> Result<(), CliError> {
        match &self.shop.cart().status().error {
            Some(message) => Err(CliError::Cart(message.clone())),
            None => Ok(()),
        }
    }
}
