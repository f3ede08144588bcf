//! Product type conversion functions.
//!
//! Flattens the edge/node connections of a product response into the
//! `Product` / `Variant` / `Image` view models.

use lustre_core::{Image, ImageId, Product, ProductId, Variant, VariantId};

use crate::shopify::types::{PageInfo, ProductPage};

use super::super::queries::{Connection, ImageFields, ProductFields, VariantFields, get_products};

pub fn convert_product(fields: ProductFields) -> Product {
    let images = convert_images(fields.images);
    let variants = convert_variants(fields.variants);
    let price = Product::display_price(&variants);

    Product {
        id: ProductId::new(fields.id),
        title: fields.title,
        handle: fields.handle,
        description: fields.description,
        images,
        variants,
        price,
    }
}

pub fn convert_product_page(connection: get_products::ProductsConnection) -> ProductPage {
    ProductPage {
        products: connection
            .edges
            .into_iter()
            .map(|e| convert_product(e.node))
            .collect(),
        page_info: PageInfo {
            has_next_page: connection.page_info.has_next_page,
            end_cursor: connection.page_info.end_cursor,
        },
    }
}

fn convert_images(images: Connection<ImageFields>) -> Vec<Image> {
    images
        .edges
        .into_iter()
        .map(|e| {
            let node = e.node;
            // Image IDs are nullable in the schema; the URL is unique per image
            let id = node.id.unwrap_or_else(|| node.src.clone());
            Image {
                id: ImageId::new(id),
                src: node.src,
                alt_text: node.alt_text,
            }
        })
        .collect()
}

fn convert_variants(variants: Connection<VariantFields>) -> Vec<Variant> {
    variants
        .edges
        .into_iter()
        .map(|e| Variant {
            id: VariantId::new(e.node.id),
            title: e.node.title,
            price: e.node.price.amount,
            available: e.node.available_for_sale,
        })
        .collect()
}
