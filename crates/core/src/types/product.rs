//! Catalog view models.
//!
//! These are the flat records the catalog client produces from the
//! Storefront API's edge/node responses. They are also embedded verbatim in
//! cart line items, so the serialized shape (camelCase, prices as decimal
//! strings) is the durable storage format.

use serde::{Deserialize, Serialize};

use super::id::{ImageId, ProductId, VariantId};
use super::price::Price;

/// Separator between option values in a variant title (`"M / Rose"`).
pub const VARIANT_TITLE_SEPARATOR: &str = " / ";

/// Display price used when a product has no variants.
pub const DEFAULT_PRICE: &str = "0.00";

/// Product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Shopify image ID.
    pub id: ImageId,
    /// Image source URL.
    pub src: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
}

/// A purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Variant ID.
    pub id: VariantId,
    /// Variant title, option values joined by `" / "`.
    pub title: String,
    /// Price as the upstream decimal string.
    pub price: String,
    /// Whether this variant is available for sale.
    pub available: bool,
}

impl Variant {
    /// Parsed price (zero if the upstream string is malformed).
    #[must_use]
    pub fn price_value(&self) -> Price {
        Price::parse_or_zero(&self.price)
    }

    /// Size and color encoded in the title.
    #[must_use]
    pub fn options(&self) -> VariantOptions {
        VariantOptions::parse(&self.title)
    }
}

/// A product in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// Plain text description.
    pub description: String,
    /// Images in display order; the first is the default.
    pub images: Vec<Image>,
    /// Variants in catalog order.
    pub variants: Vec<Variant>,
    /// Display price, taken from the first variant.
    pub price: String,
}

impl Product {
    /// Display price of a variant list: the first variant's price.
    #[must_use]
    pub fn display_price(variants: &[Variant]) -> String {
        variants
            .first()
            .map_or_else(|| DEFAULT_PRICE.to_owned(), |v| v.price.clone())
    }

    /// The default display image.
    #[must_use]
    pub fn featured_image(&self) -> Option<&Image> {
        self.images.first()
    }

    /// Look up a variant by ID.
    #[must_use]
    pub fn variant(&self, id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Distinct sizes across variants, in first-seen order.
    #[must_use]
    pub fn sizes(&self) -> Vec<String> {
        distinct(self.variants.iter().map(|v| v.options().size))
    }

    /// Distinct colors across variants, in first-seen order.
    #[must_use]
    pub fn colors(&self) -> Vec<String> {
        distinct(self.variants.iter().filter_map(|v| v.options().color))
    }

    /// Find the variant whose title encodes this size and color.
    #[must_use]
    pub fn find_variant(&self, size: &str, color: Option<&str>) -> Option<&Variant> {
        self.variants.iter().find(|v| {
            let options = v.options();
            options.size == size && options.color.as_deref() == color
        })
    }
}

fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !value.is_empty() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

/// Size and color decoded from a variant title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantOptions {
    pub size: String,
    pub color: Option<String>,
}

impl VariantOptions {
    /// Split `"Size / Color"`; a title without a separator is size only.
    #[must_use]
    pub fn parse(title: &str) -> Self {
        let mut parts = title.split(VARIANT_TITLE_SEPARATOR);
        let size = parts.next().unwrap_or_default().to_owned();
        let color = parts.next().filter(|c| !c.is_empty()).map(str::to_owned);
        Self { size, color }
    }
}

impl std::fmt::Display for VariantOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.color {
            Some(color) => write!(f, "Size: {} - Color: {color}", self.size),
            None => write!(f, "Size: {}", self.size),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn variant(id: &str, title: &str, price: &str) -> Variant {
        Variant {
            id: VariantId::new(id),
            title: title.to_string(),
            price: price.to_string(),
            available: true,
        }
    }

    fn product(variants: Vec<Variant>) -> Product {
        Product {
            id: ProductId::new("gid://shopify/Product/1"),
            title: "Velvet Lip Tint".to_string(),
            handle: "velvet-lip-tint".to_string(),
            description: String::new(),
            images: vec![],
            price: Product::display_price(&variants),
            variants,
        }
    }

    #[test]
    fn test_display_price_first_variant() {
        let variants = vec![variant("v1", "S", "18.00"), variant("v2", "M", "22.00")];
        assert_eq!(Product::display_price(&variants), "18.00");
        assert_eq!(Product::display_price(&[]), "0.00");
    }

    #[test]
    fn test_variant_options_parse() {
        let options = VariantOptions::parse("M / Rose");
        assert_eq!(options.size, "M");
        assert_eq!(options.color.as_deref(), Some("Rose"));
        assert_eq!(options.to_string(), "Size: M - Color: Rose");

        let options = VariantOptions::parse("Default Title");
        assert_eq!(options.color, None);
        assert_eq!(options.to_string(), "Size: Default Title");
    }

    #[test]
    fn test_sizes_and_colors_distinct() {
        let p = product(vec![
            variant("v1", "S / Rose", "18.00"),
            variant("v2", "M / Rose", "18.00"),
            variant("v3", "S / Plum", "18.00"),
        ]);
        assert_eq!(p.sizes(), vec!["S", "M"]);
        assert_eq!(p.colors(), vec!["Rose", "Plum"]);
    }

    #[test]
    fn test_find_variant() {
        let p = product(vec![
            variant("v1", "S / Rose", "18.00"),
            variant("v2", "S / Plum", "19.00"),
        ]);
        assert_eq!(p.find_variant("S", Some("Plum")).unwrap().id, "v2");
        assert!(p.find_variant("L", Some("Plum")).is_none());
    }

    #[test]
    fn test_serialized_shape_is_camel_case() {
        let image = Image {
            id: ImageId::new("i1"),
            src: "https://cdn.example/a.jpg".to_string(),
            alt_text: None,
        };
        let json = serde_json::to_value(&image).unwrap();
        assert!(json.get("altText").is_some());
        assert!(json.get("alt_text").is_none());
    }
}
