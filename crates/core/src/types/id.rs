//! Newtype IDs for type-safe Shopify global ID references.
//!
//! Use the `define_gid!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe Shopify global ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Accessors: `new()`, `as_str()`, `numeric_id()`
/// - `From<String>`, `From<&str>`, `AsRef<str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use lustre_core::define_gid;
/// define_gid!(ProductId);
/// define_gid!(VariantId);
///
/// let product = ProductId::new("gid://shopify/Product/1");
/// let variant = VariantId::new("gid://shopify/ProductVariant/1");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = variant;
/// assert_eq!(product.numeric_id(), Some(1));
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a global ID string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying global ID string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Trailing numeric segment of a `gid://shopify/<Type>/<n>` ID.
            #[must_use]
            pub fn numeric_id(&self) -> Option<u64> {
                $crate::types::id::numeric_segment(&self.0)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

/// Parse the trailing `/<n>` segment of a global ID.
///
/// Query strings (`?key=...`) that Shopify appends to some IDs are ignored.
#[doc(hidden)]
#[must_use]
pub fn numeric_segment(gid: &str) -> Option<u64> {
    let path = gid.split('?').next().unwrap_or(gid);
    path.rsplit('/').next()?.parse().ok()
}

// Define catalog entity IDs
define_gid!(ProductId);
define_gid!(VariantId);
define_gid!(ImageId);
