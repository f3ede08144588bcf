//! Product type and vendor enumeration.

use std::collections::BTreeSet;

use super::super::queries::{get_product_types, get_vendors};

fn non_empty(values: impl Iterator<Item = String>) -> BTreeSet<String> {
    values.filter(|v| !v.trim().is_empty()).collect()
}

pub fn distinct_product_types(data: get_product_types::ResponseData) -> BTreeSet<String> {
    non_empty(data.products.edges.into_iter().map(|e| e.node.product_type))
}

pub fn distinct_vendors(data: get_vendors::ResponseData) -> BTreeSet<String> {
    non_empty(data.products.edges.into_iter().map(|e| e.node.vendor))
}
