//! Cart commands. Every mutation is persisted before the command prints.

use lustre_storefront::VariantSelection;
use serde_json::json;
use tracing::info;

use super::{CliError, Context, output};

/// Show the cart with its totals.
///
/// # Errors
///
/// Returns an error only if output cannot be written.
pub fn show(ctx: Context) -> Result<(), CliError> {
    print_cart(&ctx)
}

/// Fetch a product and add `quantity` units of the selected variant.
///
/// # Errors
///
/// Returns `CliError::NoCredentials` without a shop, the catalog error for an
/// unknown product or variant, or `CliError::Cart` if the cart could not be
/// saved.
pub async fn add(
    mut ctx: Context,
    handle: &str,
    selection: &VariantSelection,
    quantity: u32,
) -> Result<(), CliError> {
    let Some(variant) = ctx.shop.add_product(handle, selection, quantity).await? else {
        return Err(CliError::NoCredentials);
    };
    ctx.check_cart()?;

    info!(handle, variant_id = %variant.id, quantity, "Added to cart");
    print_cart(&ctx)
}

/// Remove a line item.
///
/// # Errors
///
/// Returns `CliError::Cart` if the cart could not be saved.
pub fn remove(mut ctx: Context, item_id: &str) -> Result<(), CliError> {
    ctx.shop.cart_mut().remove_from_cart(item_id);
    ctx.check_cart()?;
    print_cart(&ctx)
}

/// Set a line item's quantity; values below 1 remove the line.
///
/// # Errors
///
/// Returns `CliError::Cart` if the cart could not be saved.
pub fn set_quantity(mut ctx: Context, item_id: &str, quantity: i64) -> Result<(), CliError> {
    ctx.shop.cart_mut().update_quantity(item_id, quantity);
    ctx.check_cart()?;
    print_cart(&ctx)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `CliError::Cart` if the stored cart could not be deleted.
pub fn clear(mut ctx: Context) -> Result<(), CliError> {
    ctx.shop.cart_mut().clear_cart();
    ctx.check_cart()?;
    print_cart(&ctx)
}

fn print_cart(ctx: &Context) -> Result<(), CliError> {
    let cart = ctx.shop.cart();

    if ctx.json {
        return ctx.emit_json(&json!({
            "items": cart.items(),
            "itemCount": cart.item_count(),
            "subtotal": cart.subtotal(),
            "status": cart.status(),
        }));
    }

    ctx.emit(&output::render_cart(
        cart.items(),
        cart.subtotal(),
        cart.status().error.as_deref(),
    ))
}
