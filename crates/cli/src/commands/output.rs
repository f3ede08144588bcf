//! Plain-text rendering of catalog and cart data.

use std::collections::BTreeSet;
use std::fmt::Write;

use lustre_core::{CartLineItem, Price, Product, format_price};
use lustre_storefront::shopify::ProductPage;

pub fn render_page(page: &ProductPage) -> String {
    let mut out = String::new();

    if page.products.is_empty() {
        out.push_str("No products found\n");
    }

    for product in &page.products {
        let _ = writeln!(
            out,
            "{:<32} {:>10}  {}",
            product.title,
            format_price(&product.price),
            product.handle
        );
    }

    if page.page_info.has_next_page
        && let Some(cursor) = &page.page_info.end_cursor
    {
        let _ = writeln!(out, "\nMore products: --after {cursor}");
    }

    out
}

pub fn render_product(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", product.title, format_price(&product.price));
    let _ = writeln!(out, "handle: {}", product.handle);

    if !product.description.is_empty() {
        let _ = writeln!(out, "\n{}\n", product.description);
    }

    let sizes = product.sizes();
    if !sizes.is_empty() {
        let _ = writeln!(out, "Sizes:  {}", sizes.join(", "));
    }
    let colors = product.colors();
    if !colors.is_empty() {
        let _ = writeln!(out, "Colors: {}", colors.join(", "));
    }

    out.push_str("\nVariants:\n");
    for variant in &product.variants {
        let availability = if variant.available { "" } else { "  (sold out)" };
        let _ = writeln!(
            out,
            "  {:<24} {:>10}  {}{availability}",
            variant.title,
            format_price(&variant.price),
            variant.id
        );
    }

    if let Some(image) = product.featured_image() {
        let _ = writeln!(out, "\nImage: {}", image.src);
    }

    out
}

pub fn render_filters(types: &BTreeSet<String>, vendors: &BTreeSet<String>) -> String {
    let join = |set: &BTreeSet<String>| {
        if set.is_empty() {
            "(none)".to_string()
        } else {
            set.iter().cloned().collect::<Vec<_>>().join(", ")
        }
    };
    format!(
        "Product types: {}\nVendors: {}\n(sampled from the first 250 products)\n",
        join(types),
        join(vendors)
    )
}

pub fn render_cart(items: &[CartLineItem], subtotal: Price, error: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(error) = error {
        let _ = writeln!(out, "! {error}");
    }

    if items.is_empty() {
        out.push_str("Your cart is empty\n");
        return out;
    }

    for item in items {
        let _ = writeln!(
            out,
            "{} x{}  {}  {}",
            item.product.title,
            item.quantity,
            item.variant.options(),
            item.line_total()
        );
        let _ = writeln!(out, "    id: {}", item.id);
    }
    let _ = writeln!(out, "\nTotal: {subtotal}");

    out
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use lustre_core::{ProductId, Variant, VariantId};
    use lustre_storefront::shopify::PageInfo;

    use super::*;

    fn product() -> Product {
        let variants = vec![
            Variant {
                id: VariantId::new("gid://shopify/ProductVariant/1"),
                title: "S / Rose".to_string(),
                price: "18".to_string(),
                available: true,
            },
            Variant {
                id: VariantId::new("gid://shopify/ProductVariant/2"),
                title: "M / Plum".to_string(),
                price: "18".to_string(),
                available: false,
            },
        ];
        Product {
            id: ProductId::new("gid://shopify/Product/1"),
            title: "Velvet Lip Tint".to_string(),
            handle: "velvet-lip-tint".to_string(),
            description: "Soft matte finish.".to_string(),
            images: vec![],
            price: Product::display_price(&variants),
            variants,
        }
    }

    #[test]
    fn test_render_page_with_cursor() {
        let page = ProductPage {
            products: vec![product()],
            page_info: PageInfo {
                has_next_page: true,
                end_cursor: Some("abc".to_string()),
            },
        };
        let text = render_page(&page);
        assert!(text.contains("Velvet Lip Tint"));
        assert!(text.contains("$18.00"));
        assert!(text.contains("--after abc"));
    }

    #[test]
    fn test_render_empty_page() {
        assert_eq!(render_page(&ProductPage::default()), "No products found\n");
    }

    #[test]
    fn test_render_product_options() {
        let text = render_product(&product());
        assert!(text.contains("Sizes:  S, M"));
        assert!(text.contains("Colors: Rose, Plum"));
        assert!(text.contains("(sold out)"));
    }

    #[test]
    fn test_render_cart_total() {
        let p = product();
        let mut item = CartLineItem::new(&p, &p.variants[0]);
        item.quantity = 2;
        let items = vec![item];
        let text = render_cart(&items, items[0].line_total(), None);
        assert!(text.contains("Velvet Lip Tint x2  Size: S - Color: Rose  $36.00"));
        assert!(text.contains("Total: $36.00"));
    }

    #[test]
    fn test_render_empty_cart_with_error() {
        let text = render_cart(&[], Price::ZERO, Some("Failed to save cart"));
        assert!(text.starts_with("! Failed to save cart"));
        assert!(text.contains("Your cart is empty"));
    }

    #[test]
    fn test_render_filters_empty() {
        let text = render_filters(&BTreeSet::new(), &BTreeSet::new());
        assert!(text.contains("Product types: (none)"));
    }
}
