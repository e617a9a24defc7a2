//! Product, variant and size types.

use crate::error::CommerceError;
use crate::ids::{CategoryId, ColorId, ProductId, SizeId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A promotional badge shown on a product card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Badge {
    /// Badge label (e.g., "Best Seller").
    pub text: String,
    /// Colour token for the badge background.
    pub color: String,
}

impl Badge {
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
        }
    }
}

/// Merchandising flags a listing can be narrowed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductFlag {
    New,
    BestSeller,
    Trending,
}

impl ProductFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductFlag::New => "new",
            ProductFlag::BestSeller => "best_seller",
            ProductFlag::Trending => "trending",
        }
    }
}

impl std::fmt::Display for ProductFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A purchasable size within a variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Size {
    /// Size label (e.g., "M", "32", "UK 8").
    pub name: String,
    /// Price for this size; may differ from the product's base price.
    pub price: Money,
    /// Units in stock. Zero means unavailable.
    pub stock: u32,
}

impl Size {
    pub fn new(name: impl Into<String>, price: Money, stock: u32) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }

    /// Facet id for this size.
    pub fn id(&self) -> SizeId {
        SizeId::new(&self.name)
    }

    /// Check if at least one unit is available.
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// Check if `quantity` units can be supplied.
    pub fn can_fulfill(&self, quantity: u32) -> bool {
        quantity <= self.stock
    }
}

/// A colour variant of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Variant {
    /// Display name of the colour (e.g., "Light Blue").
    pub color_name: String,
    /// Colour code for swatches (e.g., "#87CEEB").
    pub color_code: String,
    /// Sizes offered in this colour, in display order.
    pub sizes: Vec<Size>,
    /// Gallery images, first one is the cover.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Variant {
    pub fn new(color_name: impl Into<String>, color_code: impl Into<String>) -> Self {
        Self {
            color_name: color_name.into(),
            color_code: color_code.into(),
            sizes: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Add a size (builder style).
    pub fn with_size(mut self, name: impl Into<String>, price: Money, stock: u32) -> Self {
        self.sizes.push(Size::new(name, price, stock));
        self
    }

    /// Add an image (builder style).
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Facet id derived from the colour name.
    pub fn color_id(&self) -> ColorId {
        ColorId::new(&self.color_name)
    }

    /// Whether a colour id selects this variant, by name or by code.
    pub fn matches_color(&self, color: &ColorId) -> bool {
        color.matches(&self.color_name) || color.matches(&self.color_code)
    }

    /// Look up a size by label (case- and whitespace-insensitive).
    pub fn find_size(&self, name: &str) -> Option<(usize, &Size)> {
        let wanted = SizeId::new(name);
        self.sizes
            .iter()
            .enumerate()
            .find(|(_, s)| wanted.matches(&s.name))
    }

    /// Whether any size is in stock.
    pub fn is_in_stock(&self) -> bool {
        self.sizes.iter().any(Size::is_available)
    }

    /// Whether a size with this id is in stock.
    pub fn has_size_in_stock(&self, size: &SizeId) -> bool {
        self.sizes
            .iter()
            .any(|s| s.is_available() && size.matches(&s.name))
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Listing price.
    pub base_price: Money,
    /// Category label (e.g., "Shirts").
    pub category: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Promotional badges.
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub is_trending: bool,
    /// Advertised discount percentage, display only.
    #[serde(default)]
    pub discount: Option<u8>,
    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: f32,
    /// Number of reviews behind the rating.
    #[serde(default)]
    pub review_count: u32,
    /// Colour variants in display order.
    pub variants: Vec<Variant>,
}

impl Product {
    /// Create a product with no variants.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        base_price: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            base_price,
            category: category.into(),
            description: String::new(),
            badges: Vec::new(),
            is_new: false,
            is_best_seller: false,
            is_trending: false,
            discount: None,
            rating: 0.0,
            review_count: 0,
            variants: Vec::new(),
        }
    }

    /// Add a variant (builder style).
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Set rating and review count (builder style).
    pub fn with_rating(mut self, rating: f32, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    /// Add a badge (builder style).
    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badges.push(badge);
        self
    }

    /// Set the description (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set a merchandising flag (builder style).
    pub fn with_flag(mut self, flag: ProductFlag) -> Self {
        match flag {
            ProductFlag::New => self.is_new = true,
            ProductFlag::BestSeller => self.is_best_seller = true,
            ProductFlag::Trending => self.is_trending = true,
        }
        self
    }

    pub fn has_flag(&self, flag: ProductFlag) -> bool {
        match flag {
            ProductFlag::New => self.is_new,
            ProductFlag::BestSeller => self.is_best_seller,
            ProductFlag::Trending => self.is_trending,
        }
    }

    /// Category facet id.
    pub fn category_id(&self) -> CategoryId {
        CategoryId::new(&self.category)
    }

    /// Get a variant by index.
    pub fn variant(&self, index: usize) -> Result<&Variant, CommerceError> {
        self.variants.get(index).ok_or(CommerceError::VariantNotFound {
            product_id: self.id,
            index,
        })
    }

    /// Get a size by variant and size index.
    pub fn size(&self, variant: usize, size: usize) -> Result<&Size, CommerceError> {
        self.variant(variant)?
            .sizes
            .get(size)
            .ok_or_else(|| CommerceError::SizeNotFound {
                product_id: self.id,
                variant,
                size: size.to_string(),
            })
    }

    /// Whether any size of any variant is in stock.
    pub fn is_in_stock(&self) -> bool {
        self.variants.iter().any(Variant::is_in_stock)
    }

    /// Lowest and highest size price across all variants.
    pub fn price_range(&self) -> Option<(Money, Money)> {
        let mut prices = self.variants.iter().flat_map(|v| v.sizes.iter().map(|s| s.price));
        let first = prices.next()?;
        Some(prices.fold((first, first), |(lo, hi), p| {
            let lo = if p.amount < lo.amount { p } else { lo };
            let hi = if p.amount > hi.amount { p } else { hi };
            (lo, hi)
        }))
    }

    /// Check the structural invariants of a catalog record.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let invalid = |msg: String| Err(CommerceError::InvalidCatalog(format!("product {}: {}", self.id, msg)));

        if self.name.trim().is_empty() {
            return invalid("name is empty".to_string());
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return invalid(format!("rating {} outside 0-5", self.rating));
        }
        if self.discount.map_or(false, |d| d > 100) {
            return invalid("discount above 100%".to_string());
        }
        if self.variants.is_empty() {
            return invalid("no variants".to_string());
        }
        for (index, variant) in self.variants.iter().enumerate() {
            if variant.sizes.is_empty() {
                return invalid(format!("variant {} has no sizes", index));
            }
            if variant
                .sizes
                .iter()
                .any(|s| s.price.currency != self.base_price.currency)
            {
                return invalid(format!("variant {} mixes currencies", index));
            }
        }
        Ok(())
    }
}
