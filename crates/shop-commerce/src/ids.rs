//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a colour id where a size id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique product identifier.
///
/// Catalog ids are small integers; higher ids were added later, which is
/// why "newest" ordering sorts by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Create a new ID.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Normalize a facet label into a slug: lower-case with whitespace removed.
///
/// `"UK 8"` and `"uk8"` both become `"uk8"`.
pub fn slugify(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Macro to generate slug-backed facet id structs.
///
/// Values are normalized on construction and on deserialization, so
/// comparisons are case- and whitespace-insensitive.
macro_rules! define_slug {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a label or slug.
            pub fn new(label: impl AsRef<str>) -> Self {
                Self(slugify(label.as_ref()))
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check whether a display label normalizes to this ID.
            pub fn matches(&self, label: &str) -> bool {
                slugify(label) == self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_slug!(
    /// Category facet id, e.g. `shirts`.
    CategoryId
);
define_slug!(
    /// Colour facet id, e.g. `navy` or `lightblue`.
    ColorId
);
define_slug!(
    /// Size facet id, e.g. `xl` or `uk8`.
    SizeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id() {
        let id = ProductId::new(7);
        assert_eq!(id.get(), 7);
        assert_eq!(id.to_string(), "7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }

    #[test]
    fn test_slug_normalization() {
        assert_eq!(SizeId::new("UK 8").as_str(), "uk8");
        assert_eq!(ColorId::new("Light Blue"), ColorId::new("lightblue"));
        assert!(CategoryId::new("shirts").matches("Shirts"));
        assert!(!CategoryId::new("shirts").matches("T-Shirts"));
    }

    #[test]
    fn test_slug_deserialization_normalizes() {
        let id: SizeId = serde_json::from_str(r#""UK 10""#).unwrap();
        assert_eq!(id.as_str(), "uk10");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""uk10""#);
    }
}
