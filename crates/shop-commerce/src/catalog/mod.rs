//! Product catalog module.
//!
//! Contains product, variant and size types, plus the loaded catalog and
//! the facet lists the listing filters are built from.

mod product;
mod seed;

pub use product::{Badge, Product, ProductFlag, Size, Variant};
pub use seed::demo_products;

use crate::error::{CommerceError, Result};
use crate::ids::{CategoryId, ColorId, ProductId, SizeId};
use crate::money::Currency;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A category facet entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: CategoryId,
    pub name: String,
}

/// A colour facet entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorOption {
    pub id: ColorId,
    pub name: String,
    /// Swatch colour code.
    pub code: String,
}

/// A size facet entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SizeOption {
    pub id: SizeId,
    pub name: String,
}

/// Immutable, validated product collection.
///
/// Products keep their load order, which is the "featured" listing order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating every product and id uniqueness.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(product.id) {
                return Err(CommerceError::InvalidCatalog(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
        }
        tracing::debug!(products = products.len(), "catalog loaded");
        Ok(Self { products })
    }

    /// The built-in demo catalog.
    pub fn demo() -> Result<Self> {
        Self::new(demo_products())
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Read a JSON catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::InvalidCatalog(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// All products in featured order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a product by id, failing if absent.
    pub fn require(&self, id: ProductId) -> Result<&Product> {
        self.get(id).ok_or(CommerceError::ProductNotFound(id))
    }

    /// Fail if any product is priced in a currency other than `currency`.
    ///
    /// Lines from such a product could never be added to a cart priced in
    /// `currency`.
    pub fn ensure_currency(&self, currency: Currency) -> Result<()> {
        match self
            .products
            .iter()
            .find(|p| p.base_price.currency != currency)
        {
            Some(product) => Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: product.base_price.currency.code().to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<CategoryOption> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .filter(|p| seen.insert(p.category_id()))
            .map(|p| CategoryOption {
                id: p.category_id(),
                name: p.category.clone(),
            })
            .collect()
    }

    /// Distinct colours in first-seen order.
    pub fn colors(&self) -> Vec<ColorOption> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .flat_map(|p| &p.variants)
            .filter(|v| seen.insert(v.color_id()))
            .map(|v| ColorOption {
                id: v.color_id(),
                name: v.color_name.clone(),
                code: v.color_code.clone(),
            })
            .collect()
    }

    /// Distinct sizes in first-seen order.
    pub fn sizes(&self) -> Vec<SizeOption> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .flat_map(|p| &p.variants)
            .flat_map(|v| &v.sizes)
            .filter(|s| seen.insert(s.id()))
            .map(|s| SizeOption {
                id: s.id(),
                name: s.name.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn tiny(id: u32) -> Product {
        Product::new(id, format!("Item {}", id), Money::inr(100), "Misc")
            .with_variant(Variant::new("Red", "#E83A59").with_size("M", Money::inr(100), 1))
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Catalog::new(vec![tiny(1), tiny(1)]).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidCatalog(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::new(vec![tiny(1), tiny(2)]).unwrap();
        assert_eq!(catalog.get(ProductId::new(2)).unwrap().name, "Item 2");
        assert!(matches!(
            catalog.require(ProductId::new(9)),
            Err(CommerceError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r##"[{
            "id": 3,
            "name": "Tee",
            "basePrice": {"amount": 499, "currency": "INR"},
            "category": "T-Shirts",
            "variants": [{
                "color_name": "White",
                "color_code": "#FFFFFF",
                "sizes": [{"name": "M", "price": {"amount": 499, "currency": "INR"}, "stock": 4}]
            }]
        }]"##;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].category_id().as_str(), "t-shirts");
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            Catalog::from_json("{}"),
            Err(CommerceError::Serialization(_))
        ));
        assert!(matches!(
            Catalog::from_json(r#"[{"id":1,"name":"x","basePrice":{"amount":1,"currency":"INR"},"category":"c","variants":[]}]"#),
            Err(CommerceError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_ensure_currency() {
        let catalog = Catalog::demo().unwrap();
        assert!(catalog.ensure_currency(Currency::INR).is_ok());
        assert!(matches!(
            catalog.ensure_currency(Currency::USD),
            Err(CommerceError::CurrencyMismatch { expected, got }) if expected == "USD" && got == "INR"
        ));
        assert!(Catalog::default().ensure_currency(Currency::USD).is_ok());
    }

    #[test]
    fn test_demo_facets() {
        let catalog = Catalog::demo().unwrap();
        let categories: Vec<_> = catalog.categories().into_iter().map(|c| c.id).collect();
        assert_eq!(categories.len(), 10);
        assert_eq!(categories[0].as_str(), "shirts");

        let sizes: Vec<_> = catalog.sizes().into_iter().map(|s| s.id.to_string()).collect();
        assert!(sizes.contains(&"uk8".to_string()));
        assert!(sizes.contains(&"30".to_string()));

        assert!(catalog.colors().iter().any(|c| c.name == "Light Blue"));
    }
}
