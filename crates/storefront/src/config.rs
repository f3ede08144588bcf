//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., lustre.myshopify.com).
//!   Without it the storefront runs with no credentials and every catalog
//!   operation is a no-op.
//! - `SHOPIFY_STOREFRONT_TOKEN` - Storefront API access token (required when
//!   `SHOPIFY_STORE` is set)
//! - `SHOPIFY_API_VERSION` - API version (default: 2024-01)
//! - `LUSTRE_CART_DIR` - Directory for the stored cart (default: .lustre)
//! - `LUSTRE_PAGE_SIZE` - Products per listing page (default: 12)

use std::path::PathBuf;

use thiserror::Error;

use crate::shopify::Credentials;
use crate::shopify::types::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Default Storefront API version.
pub const DEFAULT_API_VERSION: &str = "2024-01";

/// Default directory for the stored cart.
pub const DEFAULT_CART_DIR: &str = ".lustre";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Storefront API credentials, if a shop is configured
    pub credentials: Option<Credentials>,
    /// Shopify API version (e.g., 2024-01)
    pub api_version: String,
    /// Directory holding the stored cart
    pub cart_dir: PathBuf,
    /// Products per listing page
    pub page_size: i64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            cart_dir: PathBuf::from(DEFAULT_CART_DIR),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a token is missing for a configured store,
    /// looks like a placeholder, or a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let credentials = match get_optional_env("SHOPIFY_STORE") {
            Some(store) => {
                let token = get_required_env("SHOPIFY_STOREFRONT_TOKEN")?;
                validate_token(&token, "SHOPIFY_STOREFRONT_TOKEN")?;
                Some(Credentials::new(store, token))
            }
            None => None,
        };

        let page_size = get_env_or_default("LUSTRE_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string())
            .parse::<i64>()
            .map_err(|e| ConfigError::InvalidEnvVar("LUSTRE_PAGE_SIZE".to_string(), e.to_string()))
            .and_then(|n| validate_page_size(n, "LUSTRE_PAGE_SIZE"))?;

        Ok(Self {
            credentials,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
            cart_dir: PathBuf::from(get_env_or_default("LUSTRE_CART_DIR", DEFAULT_CART_DIR)),
            page_size,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    get_optional_env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable; empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Page sizes outside the Storefront API's 1..=250 connection limit are rejected.
fn validate_page_size(n: i64, var_name: &str) -> Result<i64, ConfigError> {
    if (1..=MAX_PAGE_SIZE).contains(&n) {
        Ok(n)
    } else {
        Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must be between 1 and {MAX_PAGE_SIZE} (got {n})"),
        ))
    }
}

/// Reject tokens that are obviously copied from a template.
fn validate_token(token: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = token.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}
